//! Configuration for every featurerank subsystem.
//!
//! All sections default independently, so a partial (or empty) TOML
//! document yields a fully populated config.

pub mod clustering_config;
pub mod defaults;
pub mod embedding_config;
pub mod observability_config;
pub mod scoring_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use clustering_config::{ClusteringConfig, DistanceMetric, ThemeStrategy};
pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;
pub use scoring_config::ScoringConfig;

use crate::errors::{ConfigError, FeatureRankResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureRankConfig {
    pub embedding: EmbeddingConfig,
    pub clustering: ClusteringConfig,
    pub scoring: ScoringConfig,
    pub observability: ObservabilityConfig,
}

impl FeatureRankConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> FeatureRankResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> FeatureRankResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&source)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> FeatureRankResult<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::Parse {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> FeatureRankResult<()> {
        let invalid = |field: &str, reason: &str| -> FeatureRankResult<()> {
            Err(ConfigError::Invalid {
                field: field.to_string(),
                reason: reason.to_string(),
            }
            .into())
        };

        if self.embedding.dimensions == 0 {
            return invalid("embedding.dimensions", "must be greater than 0");
        }
        if self.embedding.batch_size == 0 {
            return invalid("embedding.batch_size", "must be greater than 0");
        }
        if self.clustering.k == 0 {
            return invalid("clustering.k", "must be greater than 0");
        }
        if self.clustering.min_items == 0 {
            return invalid("clustering.min_items", "must be greater than 0");
        }
        if self.clustering.n_init == 0 {
            return invalid("clustering.n_init", "must be greater than 0");
        }
        if self.clustering.max_iterations == 0 {
            return invalid("clustering.max_iterations", "must be greater than 0");
        }
        if !(self.clustering.tolerance.is_finite() && self.clustering.tolerance >= 0.0) {
            return invalid("clustering.tolerance", "must be a non-negative number");
        }
        if self.clustering.max_examples > defaults::MAX_EXAMPLES_LIMIT {
            return invalid("clustering.max_examples", "must be at most 3");
        }
        let confidence = self.scoring.default_confidence;
        if !(0.0..=100.0).contains(&confidence) {
            return invalid("scoring.default_confidence", "must be within [0, 100]");
        }
        if self.scoring.medium_threshold > self.scoring.high_threshold {
            return invalid(
                "scoring.medium_threshold",
                "must not exceed scoring.high_threshold",
            );
        }
        Ok(())
    }
}
