//! Sample networks for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers from other
//! crates.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // defsim-network = { path = "../defsim-network", features = ["test-fixtures"] }
//!
//! use defsim_network::fixtures;
//!
//! let network = fixtures::star();
//! ```

use crate::{Network, NetworkSnapshot};

fn load(json: &str, name: &str) -> Network {
    let snapshot = NetworkSnapshot::from_json(json)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", name, e));
    Network::from_snapshot(&snapshot)
        .unwrap_or_else(|e| panic!("Failed to build {}: {}", name, e))
}

/// Two connected agents, `{x: 0, y: 0}` and `{x: 0, y: 3}`. Unscored.
pub fn pair() -> Network {
    load(include_str!("../tests/fixtures/pair.json"), "pair.json")
}

/// Two connected agents over four features that differ only on
/// `politics`, by one step. Unscored.
pub fn near_pair() -> Network {
    load(include_str!("../tests/fixtures/near_pair.json"), "near_pair.json")
}

/// Agent 0 at the center of a star with agents 1, 2 and 3, plus agent 4
/// tied to 1 and 2. Four features per agent. Unscored.
///
/// - agent 1 differs from 0 on `b` by one step
/// - agent 2 differs from 0 on `a` by one step
/// - agent 3 differs from 0 on every feature by three steps
/// - agent 4 differs from 1 on `c` by two steps
pub fn star() -> Network {
    load(include_str!("../tests/fixtures/star.json"), "star.json")
}
