//! Dissimilarity between connected agents.
//!
//! A [`DissimilarityMetric`] scores a pair of agents in [0, 1], 0 meaning
//! identical and 1 total disagreement, and can score every tie of a network.

mod within_threshold;

pub use within_threshold::WithinThresholdMetric;

use defsim_network::{AgentId, Network};

use crate::config::MetricParams;
use crate::error::Result;

/// Capability: compute and store dissimilarity scores.
pub trait DissimilarityMetric {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Scores the pair. Pure read.
    fn dissimilarity(
        &self,
        network: &Network,
        agent1: AgentId,
        agent2: AgentId,
        params: &MetricParams,
    ) -> Result<f64>;

    /// Scores every tie of the network and stores the result on the tie.
    ///
    /// All scores are computed before any is written, so an error leaves the
    /// network untouched. Running it twice on unchanged features writes the
    /// same values.
    fn dissimilarity_networkwide(&self, network: &mut Network, params: &MetricParams) -> Result<()> {
        let current: &Network = network;
        let scores = current
            .ties()
            .map(|(a, b, _)| Ok((a, b, self.dissimilarity(current, a, b, params)?)))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(metric = self.name(), ties = scores.len(), "rescored network");

        for (a, b, dist) in scores {
            network.set_dist(a, b, dist)?;
        }
        Ok(())
    }
}
