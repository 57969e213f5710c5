//! Analytics configuration
//!
//! Every section is optional in YAML; missing values take their defaults.
//!
//! ```yaml
//! edge_mode: strict
//! pagerank:
//!   damping_factor: 0.9
//! community:
//!   method: greedy
//!   seed: 7
//! closeness: incoming
//! path_weighting: weighted
//! ```

use crate::algo::{ClosenessDirection, CommunityConfig, PageRankConfig, PathWeighting};
use crate::graph::EdgeMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for loading and analysing a graph
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Handling of edges whose endpoints are not loaded yet
    pub edge_mode: EdgeMode,
    pub pagerank: PageRankConfig,
    pub community: CommunityConfig,
    pub closeness: ClosenessDirection,
    pub path_weighting: PathWeighting,
}

impl AnalyticsConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: AnalyticsConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&contents)?;
        debug!(path = %path.display(), "Loaded analytics configuration");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let damping = self.pagerank.damping_factor;
        if damping.is_nan() || damping <= 0.0 || damping >= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "pagerank.damping_factor must be in (0, 1), got {}",
                damping
            )));
        }

        let tolerance = self.pagerank.tolerance;
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pagerank.tolerance must be positive, got {}",
                tolerance
            )));
        }

        if self.pagerank.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "pagerank.max_iterations must be at least 1".to_string(),
            ));
        }

        let resolution = self.community.resolution;
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "community.resolution must be a positive number, got {}",
                resolution
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::CommunityMethod;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.edge_mode, EdgeMode::Permissive);
        assert_eq!(config.pagerank.damping_factor, 0.85);
        assert_eq!(config.pagerank.max_iterations, 100);
        assert_eq!(config.community.method, CommunityMethod::Louvain);
        assert_eq!(config.closeness, ClosenessDirection::Outgoing);
        assert_eq!(config.path_weighting, PathWeighting::Unweighted);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "edge_mode: strict\npagerank:\n  damping_factor: 0.9\ncommunity:\n  method: greedy\n  seed: 7\n";
        let config = AnalyticsConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.edge_mode, EdgeMode::Strict);
        assert_eq!(config.pagerank.damping_factor, 0.9);
        assert_eq!(config.pagerank.tolerance, 1e-6);
        assert_eq!(config.community.method, CommunityMethod::Greedy);
        assert_eq!(config.community.seed, Some(7));
        assert_eq!(config.community.resolution, 1.0);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = AnalyticsConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_validation_errors() {
        let err = AnalyticsConfig::from_yaml_str("pagerank:\n  damping_factor: 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AnalyticsConfig::from_yaml_str("pagerank:\n  max_iterations: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AnalyticsConfig::from_yaml_str("pagerank:\n  tolerance: 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AnalyticsConfig::from_yaml_str("community:\n  resolution: -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_unknown_variant_is_yaml_error() {
        let err = AnalyticsConfig::from_yaml_str("community:\n  method: spectral\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "closeness: incoming\npath_weighting: weighted").unwrap();

        let config = AnalyticsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.closeness, ClosenessDirection::Incoming);
        assert_eq!(config.path_weighting, PathWeighting::Weighted);

        let missing = AnalyticsConfig::from_file(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = AnalyticsConfig {
            edge_mode: EdgeMode::Strict,
            ..Default::default()
        };
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(AnalyticsConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
