//! Error taxonomy for the model.
//!
//! Configuration omissions never reach this type: they are recovered with a
//! warning when parameters are built. Everything here propagates to the
//! caller.

use defsim_network::{AgentId, NetworkError};
use thiserror::Error;

use crate::config::Regime;

/// An agent whose features cannot be compared.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidAgentState {
    /// Nothing to divide by when computing a proportion of features
    #[error("{agent} has no features to compare")]
    EmptyFeatures { agent: AgentId },

    #[error("{a} and {b} do not have the same feature names")]
    FeatureMismatch { a: AgentId, b: AgentId },
}

/// Errors raised by dissimilarity metrics and influence rules.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown agent, missing tie, missing feature or unscored tie
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    InvalidAgentState(#[from] InvalidAgentState),

    #[error("{rule} does not implement the {regime} regime")]
    UnsupportedRegime { regime: Regime, rule: &'static str },

    #[error("influence needs at least one partner agent")]
    NoPartners,
}

pub type Result<T> = std::result::Result<T, CoreError>;
