//! Network errors.

use thiserror::Error;

use crate::AgentId;

/// Errors raised by network lookups and mutations.
///
/// These are topology and data defects: the caller asked about an agent,
/// tie or feature the network does not have.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("{0} is not in the network")]
    UnknownAgent(AgentId),

    #[error("{0} is already in the network")]
    DuplicateAgent(AgentId),

    #[error("{a} and {b} are not connected")]
    NotAdjacent { a: AgentId, b: AgentId },

    #[error("cannot connect {0} to itself")]
    SelfLoop(AgentId),

    #[error("{agent} has no feature '{feature}'")]
    UnknownFeature { agent: AgentId, feature: String },

    /// The tie exists but its dissimilarity has never been computed.
    #[error("tie between {a} and {b} has no dissimilarity score")]
    UnscoredTie { a: AgentId, b: AgentId },
}
