//! Agent and tie data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Unique identifier for an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent_{}", self.0)
    }
}

/// Feature vector of an agent, keyed by feature name.
///
/// Values are ordinal or categorical codes stored as `f64` so that
/// continuous attributes can share the representation.
pub type Features = BTreeMap<String, f64>;

/// A node of the social network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub features: Features,
}

impl Agent {
    pub fn new(id: AgentId, features: Features) -> Self {
        Self { id, features }
    }

    /// Value of a single feature, if the agent has it
    pub fn feature(&self, name: &str) -> Option<f64> {
        self.features.get(name).copied()
    }

    /// Feature names in ascending order
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }
}

/// An undirected social tie.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Tie {
    /// Dissimilarity between the endpoints in [0, 1].
    /// `None` until the tie is scored for the first time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dist: Option<f64>,
}

/// Builds a feature map from name/value pairs.
pub fn features<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Features {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_id_display() {
        assert_eq!(AgentId(7).to_string(), "agent_7");
    }

    #[test]
    fn test_feature_names_sorted() {
        let agent = Agent::new(AgentId(1), features([("y", 2.0), ("x", 0.0), ("z", 1.0)]));
        let names: Vec<&str> = agent.feature_names().collect();
        assert_eq!(names, vec!["x", "y", "z"]);
        assert_eq!(agent.feature("y"), Some(2.0));
        assert_eq!(agent.feature("w"), None);
    }

    #[test]
    fn test_unscored_tie_serialization() {
        let json = serde_json::to_string(&Tie::default()).unwrap();
        assert_eq!(json, "{}");

        let tie: Tie = serde_json::from_str(r#"{"dist":0.25}"#).unwrap();
        assert_eq!(tie, Tie { dist: Some(0.25) });
    }
}
