//! Model configuration.
//!
//! Every option the metric and the influence rule recognise is listed in
//! [`ModelConfig`]. `agreement_threshold` and `homophily` may be omitted: a
//! warning is logged and the default of 1 applies. `regime` has no default.
//! `exclude` defaults to empty without a warning.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::dissimilarity::WithinThresholdMetric;

/// Default agreement threshold when none is configured
pub const DEFAULT_AGREEMENT_THRESHOLD: f64 = 1.0;
/// Default homophily when none is configured
pub const DEFAULT_HOMOPHILY: f64 = 1.0;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid {key} = {value}: must be {expected}")]
    InvalidValue {
        key: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("unknown regime '{0}', expected one-to-one, one-to-many or many-to-one")]
    UnknownRegime(String),
}

/// Cardinality and direction of an influence event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Regime {
    /// The focal agent influences a single partner
    OneToOne,
    /// The focal agent influences each of several partners
    OneToMany,
    /// Several partners influence the focal agent
    ManyToOne,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::OneToOne => "one-to-one",
            Regime::OneToMany => "one-to-many",
            Regime::ManyToOne => "many-to-one",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Regime {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one-to-one" => Ok(Regime::OneToOne),
            "one-to-many" => Ok(Regime::OneToMany),
            "many-to-one" => Ok(Regime::ManyToOne),
            other => Err(ConfigError::UnknownRegime(other.to_string())),
        }
    }
}

/// Parameters read by a dissimilarity metric on every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricParams {
    /// Maximum absolute difference at which two values agree
    pub agreement_threshold: f64,
}

impl MetricParams {
    /// Validates the threshold, falling back to the default with a warning
    /// when it is not given.
    pub fn new(agreement_threshold: Option<f64>) -> Result<Self, ConfigError> {
        let agreement_threshold = or_default(
            agreement_threshold,
            "agreement_threshold",
            DEFAULT_AGREEMENT_THRESHOLD,
        );
        if !agreement_threshold.is_finite() || agreement_threshold < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "agreement_threshold",
                value: agreement_threshold,
                expected: "a finite number >= 0",
            });
        }
        Ok(Self { agreement_threshold })
    }
}

/// Parameters read by an influence rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfluenceParams {
    pub regime: Regime,
    /// Shape of the adoption curve; 1 is linear
    pub homophily: f64,
    /// Shared with the metric when ties are rescored after an adoption
    pub metric: MetricParams,
}

impl InfluenceParams {
    pub fn new(
        regime: Regime,
        homophily: Option<f64>,
        agreement_threshold: Option<f64>,
    ) -> Result<Self, ConfigError> {
        let homophily = or_default(homophily, "homophily", DEFAULT_HOMOPHILY);
        if !homophily.is_finite() || homophily <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "homophily",
                value: homophily,
                expected: "a finite number > 0",
            });
        }
        Ok(Self {
            regime,
            homophily,
            metric: MetricParams::new(agreement_threshold)?,
        })
    }

    pub fn agreement_threshold(&self) -> f64 {
        self.metric.agreement_threshold
    }
}

fn or_default(value: Option<f64>, key: &str, default: f64) -> f64 {
    value.unwrap_or_else(|| {
        tracing::warn!("{} not specified, using default value {}", key, default);
        default
    })
}

/// Complete model configuration, as written in a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub regime: Regime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreement_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homophily: Option<f64>,
    /// Features the metric leaves out of its agreement count
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ModelConfig {
    /// A configuration for the given regime with every other option unset.
    pub fn new(regime: Regime) -> Self {
        Self {
            regime,
            agreement_threshold: None,
            homophily: None,
            exclude: Vec::new(),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Applies defaults and validates every value.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        Ok(ResolvedConfig {
            influence: InfluenceParams::new(
                self.regime,
                self.homophily,
                self.agreement_threshold,
            )?,
            exclude: self.exclude.iter().cloned().collect(),
        })
    }
}

/// Validated configuration with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub influence: InfluenceParams,
    pub exclude: BTreeSet<String>,
}

impl ResolvedConfig {
    pub fn metric_params(&self) -> &MetricParams {
        &self.influence.metric
    }

    /// The within-threshold metric configured with this exclusion set.
    pub fn metric(&self) -> WithinThresholdMetric {
        WithinThresholdMetric::new(self.exclude.iter().cloned())
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Influence model configuration

# one-to-one, one-to-many or many-to-one
regime = "one-to-one"

# Values within this distance of each other count as agreeing
agreement_threshold = 1.0

# Shape of the adoption curve; 1 is linear
homophily = 1.0

# Features ignored when counting agreement
exclude = []
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Collects formatted log lines for inspection.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn logged_while<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        (value, logs.text())
    }

    #[test]
    fn test_default_config_toml_parses() {
        let config = ModelConfig::from_str(&default_config_toml()).unwrap();
        assert_eq!(config.regime, Regime::OneToOne);
        assert_eq!(config.agreement_threshold, Some(1.0));
        assert_eq!(config.homophily, Some(1.0));
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ModelConfig::from_str(r#"regime = "one-to-many""#).unwrap();
        assert_eq!(config.agreement_threshold, None);

        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.influence.regime, Regime::OneToMany);
        assert_eq!(resolved.influence.homophily, DEFAULT_HOMOPHILY);
        assert_eq!(resolved.influence.agreement_threshold(), DEFAULT_AGREEMENT_THRESHOLD);
        assert!(resolved.exclude.is_empty());
    }

    #[test]
    fn test_omitted_values_are_warned_about() {
        let (resolved, logs) = logged_while(|| ModelConfig::new(Regime::OneToMany).resolve());
        assert!(resolved.is_ok());
        assert!(logs.contains("WARN"), "{}", logs);
        assert!(logs.contains("homophily not specified, using default value 1"));
        assert!(logs.contains("agreement_threshold not specified, using default value 1"));

        let (_, logs) = logged_while(|| MetricParams::new(None));
        assert_eq!(logs.matches("not specified").count(), 1);
    }

    #[test]
    fn test_given_values_resolve_silently() {
        let (resolved, logs) = logged_while(|| {
            ModelConfig::from_str(&default_config_toml()).unwrap().resolve()
        });
        assert!(resolved.is_ok());
        assert!(!logs.contains("not specified"), "{}", logs);
    }

    #[test]
    fn test_regime_is_required() {
        let err = ModelConfig::from_str("homophily = 2.0").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_unknown_regime_rejected() {
        assert!(ModelConfig::from_str(r#"regime = "all-to-all""#).is_err());
        assert!(matches!(
            "all-to-all".parse::<Regime>(),
            Err(ConfigError::UnknownRegime(_))
        ));
    }

    #[test]
    fn test_regime_names_round_trip() {
        for regime in [Regime::OneToOne, Regime::OneToMany, Regime::ManyToOne] {
            assert_eq!(regime.to_string().parse::<Regime>().unwrap(), regime);
        }
        assert_eq!(Regime::ManyToOne.to_string(), "many-to-one");
    }

    #[test]
    fn test_full_config_resolves() {
        let toml = r#"
            regime = "one-to-one"
            agreement_threshold = 0.0
            homophily = 2.5
            exclude = ["age", "sex"]
        "#;

        let resolved = ModelConfig::from_str(toml).unwrap().resolve().unwrap();
        assert_eq!(resolved.metric_params().agreement_threshold, 0.0);
        assert_eq!(resolved.influence.homophily, 2.5);
        assert!(resolved.exclude.contains("age"));
        assert!(resolved.metric().excludes("sex"));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = MetricParams::new(Some(-1.0)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "agreement_threshold", .. }
        ));
    }

    #[test]
    fn test_non_positive_homophily_rejected() {
        for homophily in [0.0, -2.0, f64::NAN] {
            let err = InfluenceParams::new(Regime::OneToOne, Some(homophily), Some(1.0)).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { key: "homophily", .. }));
        }
    }

    #[test]
    fn test_config_to_toml() {
        let mut config = ModelConfig::new(Regime::OneToMany);
        config.homophily = Some(0.5);

        let toml = config.to_toml().unwrap();
        assert!(toml.contains(r#"regime = "one-to-many""#));
        assert!(!toml.contains("agreement_threshold"));
        assert_eq!(ModelConfig::from_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.toml");
        std::fs::write(&path, default_config_toml()).unwrap();

        let config = ModelConfig::from_file(&path).unwrap();
        assert_eq!(config.regime, Regime::OneToOne);

        let missing = ModelConfig::from_file(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io(_)));
    }
}
