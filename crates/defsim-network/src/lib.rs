//! Social network data for the opinion-dynamics model.
//!
//! This crate contains pure data structures with no model logic: agents with
//! their feature vectors, undirected ties carrying a dissimilarity score, and
//! serializable snapshots. The dissimilarity metric and influence rules live
//! in `defsim-core`.

pub mod agent;
pub mod error;
pub mod network;
pub mod snapshot;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use agent::{features, Agent, AgentId, Features, Tie};
pub use error::NetworkError;
pub use network::Network;
pub use snapshot::{NetworkSnapshot, TieSnapshot};
