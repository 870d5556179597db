//! Rescoring the ties around agents whose features changed.

use defsim_network::{AgentId, Network};
use std::collections::BTreeSet;

use crate::config::MetricParams;
use crate::dissimilarity::DissimilarityMetric;
use crate::error::Result;

/// Recomputes `dist` on every tie incident to the given agents.
///
/// A tie shared by two affected agents is scored once. Scores are computed
/// before any is written, so on error no tie changes.
pub fn update_dissimilarity(
    network: &mut Network,
    affected: &[AgentId],
    metric: &dyn DissimilarityMetric,
    params: &MetricParams,
) -> Result<()> {
    let mut pairs = BTreeSet::new();
    for &agent in affected {
        pairs.extend(network.incident_pairs(agent)?);
    }

    let current: &Network = network;
    let scores = pairs
        .into_iter()
        .map(|(a, b)| Ok((a, b, metric.dissimilarity(current, a, b, params)?)))
        .collect::<Result<Vec<_>>>()?;

    for (a, b, dist) in scores {
        tracing::trace!(%a, %b, dist, "rescored tie");
        network.set_dist(a, b, dist)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dissimilarity::WithinThresholdMetric;
    use defsim_network::features;

    fn params() -> MetricParams {
        MetricParams::new(Some(0.0)).unwrap()
    }

    /// 0 - 1 - 2 - 3 on a single feature
    fn path() -> Network {
        let mut network = Network::new();
        for id in 0..4 {
            network.add_agent(AgentId(id), features([("x", 0.0)])).unwrap();
        }
        for id in 0..3 {
            network.connect(AgentId(id), AgentId(id + 1)).unwrap();
        }
        network
    }

    #[test]
    fn test_only_incident_ties_are_rescored() {
        let mut network = path();
        let metric = WithinThresholdMetric::default();
        metric.dissimilarity_networkwide(&mut network, &params()).unwrap();

        network.set_feature(AgentId(1), "x", 1.0).unwrap();
        network.set_feature(AgentId(3), "x", 1.0).unwrap();
        update_dissimilarity(&mut network, &[AgentId(1)], &metric, &params()).unwrap();

        assert_eq!(network.dist(AgentId(0), AgentId(1)).unwrap(), 1.0);
        assert_eq!(network.dist(AgentId(1), AgentId(2)).unwrap(), 1.0);
        // stale until agent 3 is rescored
        assert_eq!(network.dist(AgentId(2), AgentId(3)).unwrap(), 0.0);
    }

    #[test]
    fn test_shared_tie_scored_once_for_both_endpoints() {
        let mut network = path();
        let metric = WithinThresholdMetric::default();

        network.set_feature(AgentId(1), "x", 2.0).unwrap();
        update_dissimilarity(&mut network, &[AgentId(1), AgentId(2)], &metric, &params()).unwrap();

        assert_eq!(network.dist(AgentId(1), AgentId(2)).unwrap(), 1.0);
        assert_eq!(network.dist(AgentId(2), AgentId(3)).unwrap(), 0.0);
        assert!(network.tie(AgentId(0), AgentId(1)).unwrap().dist.is_some());
    }

    #[test]
    fn test_unknown_agent_writes_nothing() {
        let mut network = path();
        let metric = WithinThresholdMetric::default();

        let result = update_dissimilarity(&mut network, &[AgentId(1), AgentId(9)], &metric, &params());

        assert!(result.is_err());
        assert!(network.ties().all(|(_, _, tie)| tie.dist.is_none()));
    }
}
