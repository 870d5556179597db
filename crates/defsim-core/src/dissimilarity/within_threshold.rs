//! Hamming-style distance with an agreement threshold.
//!
//! Two ordinal values agree when they lie within `agreement_threshold` of each
//! other. The score is the share of features on which the agents do not agree:
//!
//! ```text
//! overlap       = |{f : |a_f - b_f| <= at, f not excluded}| / |features|
//! dissimilarity = 1 - overlap
//! ```
//!
//! Excluded features never count as agreeing but stay in the denominator, so
//! an exclusion set raises the floor of the score for every pair.

use defsim_network::{AgentId, Network};
use std::collections::BTreeSet;

use super::DissimilarityMetric;
use crate::config::MetricParams;
use crate::error::{InvalidAgentState, Result};

/// Within-threshold distance over categorical but ordinal features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WithinThresholdMetric {
    exclude: BTreeSet<String>,
}

impl WithinThresholdMetric {
    pub fn new<I, S>(exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    pub fn excludes(&self, feature: &str) -> bool {
        self.exclude.contains(feature)
    }
}

impl DissimilarityMetric for WithinThresholdMetric {
    fn name(&self) -> &'static str {
        "within-threshold"
    }

    fn dissimilarity(
        &self,
        network: &Network,
        agent1: AgentId,
        agent2: AgentId,
        params: &MetricParams,
    ) -> Result<f64> {
        let first = &network.agent(agent1)?.features;
        let second = &network.agent(agent2)?.features;

        if first.is_empty() {
            return Err(InvalidAgentState::EmptyFeatures { agent: agent1 }.into());
        }
        if first.len() != second.len() || first.keys().any(|name| !second.contains_key(name)) {
            return Err(InvalidAgentState::FeatureMismatch { a: agent1, b: agent2 }.into());
        }

        let agreeing = first
            .iter()
            .filter(|(name, _)| !self.excludes(name))
            .filter(|(name, value)| (**value - second[name.as_str()]).abs() <= params.agreement_threshold)
            .count();

        Ok(1.0 - agreeing as f64 / first.len() as f64)
    }
}
