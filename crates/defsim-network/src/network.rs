//! The social network: agents on nodes, ties on undirected edges.
//!
//! Backed by petgraph's undirected `Graph` with a HashMap index from
//! `AgentId` to the internal node index. The network is owned by whatever
//! drives the simulation; the model only reads agents, overwrites single
//! feature values and writes tie dissimilarities.

use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Undirected;
use std::collections::HashMap;

use crate::agent::{Agent, AgentId, Features, Tie};
use crate::error::NetworkError;

/// Undirected social network.
#[derive(Debug, Clone)]
pub struct Network {
    graph: Graph<Agent, Tie, Undirected>,
    node_index: HashMap<AgentId, NodeIndex>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    pub fn new() -> Self {
        Self {
            graph: Graph::new_undirected(),
            node_index: HashMap::new(),
        }
    }

    /// Adds an agent with the given features.
    pub fn add_agent(&mut self, id: AgentId, features: Features) -> Result<(), NetworkError> {
        if self.node_index.contains_key(&id) {
            return Err(NetworkError::DuplicateAgent(id));
        }
        let idx = self.graph.add_node(Agent::new(id, features));
        self.node_index.insert(id, idx);
        Ok(())
    }

    /// Adds an unscored tie between two agents. Connecting an already
    /// connected pair leaves the existing tie untouched.
    pub fn connect(&mut self, a: AgentId, b: AgentId) -> Result<(), NetworkError> {
        if a == b {
            return Err(NetworkError::SelfLoop(a));
        }
        let a_idx = self.index_of(a)?;
        let b_idx = self.index_of(b)?;
        if self.graph.find_edge(a_idx, b_idx).is_none() {
            self.graph.add_edge(a_idx, b_idx, Tie::default());
        }
        Ok(())
    }

    pub fn agent(&self, id: AgentId) -> Result<&Agent, NetworkError> {
        let idx = self.index_of(id)?;
        Ok(&self.graph[idx])
    }

    /// Value of one feature of one agent.
    pub fn feature(&self, id: AgentId, name: &str) -> Result<f64, NetworkError> {
        self.agent(id)?
            .feature(name)
            .ok_or_else(|| NetworkError::UnknownFeature {
                agent: id,
                feature: name.to_string(),
            })
    }

    /// Overwrites an existing feature and returns the previous value.
    ///
    /// Features are never added this way; an agent's feature set is fixed
    /// once it joins the network.
    pub fn set_feature(&mut self, id: AgentId, name: &str, value: f64) -> Result<f64, NetworkError> {
        let idx = self.index_of(id)?;
        let slot = self.graph[idx]
            .features
            .get_mut(name)
            .ok_or_else(|| NetworkError::UnknownFeature {
                agent: id,
                feature: name.to_string(),
            })?;
        Ok(std::mem::replace(slot, value))
    }

    /// Neighbors of an agent in ascending id order.
    pub fn neighbors(&self, id: AgentId) -> Result<Vec<AgentId>, NetworkError> {
        let idx = self.index_of(id)?;
        let mut neighbors: Vec<AgentId> = self
            .graph
            .neighbors(idx)
            .map(|n| self.graph[n].id)
            .collect();
        neighbors.sort_unstable();
        Ok(neighbors)
    }

    pub fn tie(&self, a: AgentId, b: AgentId) -> Result<&Tie, NetworkError> {
        let edge = self.edge_between(a, b)?;
        Ok(&self.graph[edge])
    }

    /// Current dissimilarity on the tie between `a` and `b`.
    pub fn dist(&self, a: AgentId, b: AgentId) -> Result<f64, NetworkError> {
        self.tie(a, b)?
            .dist
            .ok_or(NetworkError::UnscoredTie { a, b })
    }

    pub fn set_dist(&mut self, a: AgentId, b: AgentId, dist: f64) -> Result<(), NetworkError> {
        let edge = self.edge_between(a, b)?;
        self.graph[edge].dist = Some(dist);
        Ok(())
    }

    /// Every tie exactly once, endpoints ordered so the smaller id comes first.
    pub fn ties(&self) -> impl Iterator<Item = (AgentId, AgentId, &Tie)> + '_ {
        self.graph.edge_references().map(|edge| {
            let (a, b) = ordered(self.graph[edge.source()].id, self.graph[edge.target()].id);
            (a, b, edge.weight())
        })
    }

    /// Unordered pairs of the ties incident to an agent.
    pub fn incident_pairs(&self, id: AgentId) -> Result<Vec<(AgentId, AgentId)>, NetworkError> {
        let idx = self.index_of(id)?;
        Ok(self
            .graph
            .edges(idx)
            .map(|edge| ordered(self.graph[edge.source()].id, self.graph[edge.target()].id))
            .collect())
    }

    /// Agent ids in ascending order.
    pub fn agent_ids(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.node_index.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.graph.node_weights()
    }

    pub fn agent_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn tie_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn index_of(&self, id: AgentId) -> Result<NodeIndex, NetworkError> {
        self.node_index
            .get(&id)
            .copied()
            .ok_or(NetworkError::UnknownAgent(id))
    }

    fn edge_between(&self, a: AgentId, b: AgentId) -> Result<EdgeIndex, NetworkError> {
        let a_idx = self.index_of(a)?;
        let b_idx = self.index_of(b)?;
        self.graph
            .find_edge(a_idx, b_idx)
            .ok_or(NetworkError::NotAdjacent { a, b })
    }
}

fn ordered(a: AgentId, b: AgentId) -> (AgentId, AgentId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
