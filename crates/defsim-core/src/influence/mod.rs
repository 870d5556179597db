//! Influence rules.
//!
//! An [`InfluenceRule`] takes a focal agent and one or more partners and tries
//! to copy a feature value between them. Randomness is injected by the caller
//! so that a seeded generator reproduces a run exactly.

mod agreement_threshold;

pub use agreement_threshold::AgreementThresholdAdoption;

use defsim_network::{AgentId, Network};
use rand::RngCore;

use crate::config::InfluenceParams;
use crate::dissimilarity::DissimilarityMetric;
use crate::error::Result;

/// Capability: spread a feature between agents.
pub trait InfluenceRule {
    /// Short name used in errors and log output
    fn name(&self) -> &'static str;

    /// Attempts one influence event and reports whether any agent changed.
    ///
    /// `partners` must not be empty; a single partner is a one-element slice.
    /// `attributes` restricts which features may be copied and defaults to
    /// every feature of the focal agent. Ties around every changed agent are
    /// rescored with `metric` before this returns.
    #[allow(clippy::too_many_arguments)]
    fn spread_influence(
        &self,
        network: &mut Network,
        focal: AgentId,
        partners: &[AgentId],
        metric: &dyn DissimilarityMetric,
        attributes: Option<&[String]>,
        params: &InfluenceParams,
        rng: &mut dyn RngCore,
    ) -> Result<bool>;
}

/// Probability that a partner adopts a feature, given the dissimilarity of
/// the tie and the homophily.
///
/// The curve passes through 1, 0.5 and 0 at dissimilarity 0, 0.5 and 1 for
/// any positive homophily. Homophily 1 gives `1 - dist`; larger values favour
/// similar pairs more sharply, smaller values flatten the curve.
pub fn adoption_probability(dist: f64, homophily: f64) -> f64 {
    let scale = 0.5_f64.powf(1.0 - homophily);
    if dist >= 0.5 {
        scale * (1.0 - dist).powf(homophily)
    } else {
        1.0 - scale * dist.powf(homophily)
    }
}
