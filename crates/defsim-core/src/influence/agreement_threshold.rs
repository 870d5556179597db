//! Similarity-based adoption limited by an agreement threshold.
//!
//! Assimilation in the style of Axelrod's dissemination of culture, with the
//! agreement-threshold variation: the focal agent sends one feature to its
//! partners, and a partner adopts it with a probability that grows with the
//! similarity of the pair. The feature is drawn from those on which the focal
//! agent and at least one partner differ by no more than the agreement
//! threshold; once drawn, it is offered to every partner.

use defsim_network::{AgentId, Network};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::{adoption_probability, InfluenceRule};
use crate::config::{InfluenceParams, Regime};
use crate::dissimilarity::DissimilarityMetric;
use crate::error::{CoreError, Result};
use crate::update::update_dissimilarity;

/// Agreement-threshold adoption for the one-to-one and one-to-many regimes.
///
/// Many-to-one influence is not implemented and fails before the network is
/// read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgreementThresholdAdoption;

impl AgreementThresholdAdoption {
    /// Features on which `partner` differs from `focal` by at most `at`.
    fn incongruent_features(
        network: &Network,
        focal: AgentId,
        partner: AgentId,
        attributes: &[String],
        at: f64,
    ) -> Result<Vec<String>> {
        let mut eligible = Vec::new();
        for feature in attributes {
            let own = network.feature(focal, feature)?;
            let theirs = network.feature(partner, feature)?;
            if own != theirs && (own - theirs).abs() <= at {
                eligible.push(feature.clone());
            }
        }
        Ok(eligible)
    }
}

impl InfluenceRule for AgreementThresholdAdoption {
    fn name(&self) -> &'static str {
        "agreement-threshold adoption"
    }

    fn spread_influence(
        &self,
        network: &mut Network,
        focal: AgentId,
        partners: &[AgentId],
        metric: &dyn DissimilarityMetric,
        attributes: Option<&[String]>,
        params: &InfluenceParams,
        rng: &mut dyn RngCore,
    ) -> Result<bool> {
        if params.regime == Regime::ManyToOne {
            return Err(CoreError::UnsupportedRegime {
                regime: params.regime,
                rule: self.name(),
            });
        }
        if partners.is_empty() {
            return Err(CoreError::NoPartners);
        }

        let attributes: Vec<String> = match attributes {
            Some(names) => names.to_vec(),
            None => network
                .agent(focal)?
                .feature_names()
                .map(str::to_string)
                .collect(),
        };

        // Every partner is checked before anything is written, so topology
        // errors surface with the network untouched.
        let mut pool: Vec<String> = Vec::new();
        for &partner in partners {
            let dist = network.dist(focal, partner)?;
            if dist >= 1.0 {
                continue;
            }
            let eligible = Self::incongruent_features(
                network,
                focal,
                partner,
                &attributes,
                params.agreement_threshold(),
            )?;
            for feature in eligible {
                if !pool.contains(&feature) {
                    pool.push(feature);
                }
            }
        }

        tracing::trace!(%focal, pool = ?pool, "incongruent features");

        let Some(feature) = pool.choose(&mut *rng) else {
            return Ok(false);
        };
        let value = network.feature(focal, feature)?;

        // The feature is offered to every partner, including those it was not
        // drawn from; the tie's dissimilarity alone sets the odds.
        let mut success = false;
        for &partner in partners {
            // Re-read: a duplicate partner may already have been rescored.
            let dist = network.dist(focal, partner)?;
            if network.feature(partner, feature)? == value {
                continue;
            }

            let p = adoption_probability(dist, params.homophily);
            if rng.gen::<f64>() >= p {
                continue;
            }

            let previous = network.set_feature(partner, feature, value)?;
            if let Err(e) = update_dissimilarity(network, &[partner], metric, &params.metric) {
                network.set_feature(partner, feature, previous)?;
                return Err(e);
            }

            tracing::debug!(
                %focal,
                %partner,
                feature = feature.as_str(),
                value,
                p,
                "feature adopted"
            );
            success = true;
        }

        Ok(success)
    }
}
