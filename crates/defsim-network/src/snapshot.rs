//! Snapshot Types
//!
//! Serialization structs for handing a network to and from the driver that
//! owns it. Snapshots are sorted by agent id and tie endpoints, so two
//! networks with the same content serialize to identical JSON.

use serde::{Deserialize, Serialize};

use crate::agent::{Agent, AgentId};
use crate::error::NetworkError;
use crate::network::Network;

/// A tie with its endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieSnapshot {
    pub a: AgentId,
    pub b: AgentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dist: Option<f64>,
}

/// Complete network state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub agents: Vec<Agent>,
    #[serde(default)]
    pub ties: Vec<TieSnapshot>,
}

impl NetworkSnapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Network {
    /// Captures agents and ties in canonical order.
    pub fn snapshot(&self) -> NetworkSnapshot {
        let mut agents: Vec<Agent> = self.agents().cloned().collect();
        agents.sort_by_key(|agent| agent.id);

        let mut ties: Vec<TieSnapshot> = self
            .ties()
            .map(|(a, b, tie)| TieSnapshot { a, b, dist: tie.dist })
            .collect();
        ties.sort_by_key(|tie| (tie.a, tie.b));

        NetworkSnapshot { agents, ties }
    }

    /// Rebuilds a network from a snapshot.
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Result<Self, NetworkError> {
        let mut network = Network::new();
        for agent in &snapshot.agents {
            network.add_agent(agent.id, agent.features.clone())?;
        }
        for tie in &snapshot.ties {
            network.connect(tie.a, tie.b)?;
            if let Some(dist) = tie.dist {
                network.set_dist(tie.a, tie.b, dist)?;
            }
        }
        Ok(network)
    }
}
