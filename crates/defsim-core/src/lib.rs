//! Dissimilarity and influence core of an agent-based opinion-dynamics model.
//!
//! Agents sit on the nodes of a [`Network`] and hold ordinal features. Ties
//! carry a dissimilarity score written by a [`DissimilarityMetric`]. An
//! [`InfluenceRule`] copies a feature from one agent to others and rescores
//! the ties around every agent it changed.
//!
//! # Modules
//!
//! - [`config`]: TOML configuration, defaults and validation
//! - [`dissimilarity`]: the metric capability and the within-threshold metric
//! - [`influence`]: the influence capability, the adoption curve and
//!   agreement-threshold adoption
//! - [`update`]: rescoring the ties around changed agents
//!
//! # Example
//!
//! ```
//! use defsim_core::{
//!     AgreementThresholdAdoption, DissimilarityMetric, InfluenceRule, ModelConfig,
//! };
//! use defsim_network::{features, AgentId, Network};
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let mut network = Network::new();
//! network.add_agent(AgentId(0), features([("x", 0.0), ("y", 1.0)])).unwrap();
//! network.add_agent(AgentId(1), features([("x", 0.0), ("y", 2.0)])).unwrap();
//! network.connect(AgentId(0), AgentId(1)).unwrap();
//!
//! let config = ModelConfig::from_str(
//!     "regime = \"one-to-one\"\nagreement_threshold = 1.0\nhomophily = 1.0",
//! )
//! .unwrap()
//! .resolve()
//! .unwrap();
//! let metric = config.metric();
//! metric.dissimilarity_networkwide(&mut network, config.metric_params()).unwrap();
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let changed = AgreementThresholdAdoption
//!     .spread_influence(
//!         &mut network,
//!         AgentId(0),
//!         &[AgentId(1)],
//!         &metric,
//!         None,
//!         &config.influence,
//!         &mut rng,
//!     )
//!     .unwrap();
//!
//! assert!(changed);
//! assert_eq!(network.feature(AgentId(1), "y").unwrap(), 1.0);
//! ```

pub mod config;
pub mod dissimilarity;
pub mod error;
pub mod influence;
pub mod update;

pub use defsim_network::{AgentId, Network};

pub use config::{
    default_config_toml, ConfigError, InfluenceParams, MetricParams, ModelConfig, Regime,
    ResolvedConfig, DEFAULT_AGREEMENT_THRESHOLD, DEFAULT_HOMOPHILY,
};
pub use dissimilarity::{DissimilarityMetric, WithinThresholdMetric};
pub use error::{CoreError, InvalidAgentState};
pub use influence::{adoption_probability, AgreementThresholdAdoption, InfluenceRule};
pub use update::update_dissimilarity;
