//! Error taxonomy.
//!
//! Subsystem enums wrap into [`FeatureRankError`], which also carries the
//! four caller-facing classes: invalid input, insufficient data, invalid
//! score input and incomplete candidate.

mod clustering_error;
mod config_error;
mod embedding_error;
mod scoring_error;

pub use clustering_error::ClusteringError;
pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use scoring_error::ScoringError;

use serde::{Deserialize, Serialize};

use crate::models::RiceField;

/// Crate-wide result alias.
pub type FeatureRankResult<T> = Result<T, FeatureRankError>;

/// Top-level error for every featurerank operation.
#[derive(Debug, thiserror::Error)]
pub enum FeatureRankError {
    /// Empty or malformed feedback text, or a duplicate feedback id.
    #[error("invalid input {item}: {reason}")]
    InvalidInput { item: String, reason: String },

    #[error("insufficient data: {available} items, at least {required} required")]
    InsufficientData { available: usize, required: usize },

    /// A RICE field outside its valid range. `cluster` is `None` when the
    /// inputs were scored outside of a pipeline run.
    #[error("invalid {field} = {value}: {reason}")]
    InvalidScoreInput {
        field: RiceField,
        value: f64,
        reason: String,
        cluster: Option<usize>,
    },

    /// Required RICE fields were never supplied. Non-fatal inside a run.
    #[error("candidate for cluster {cluster} is missing {}", join_fields(.missing))]
    IncompleteCandidate {
        cluster: usize,
        missing: Vec<RiceField>,
    },

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("clustering error: {0}")]
    ClusteringError(#[from] ClusteringError),

    #[error("scoring error: {0}")]
    ScoringError(#[from] ScoringError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// Error class, for callers that branch on the kind of failure only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    InsufficientData,
    InvalidScoreInput,
    IncompleteCandidate,
    Embedding,
    Clustering,
    Scoring,
    Config,
}

impl FeatureRankError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::InsufficientData { .. } => ErrorKind::InsufficientData,
            Self::InvalidScoreInput { .. } => ErrorKind::InvalidScoreInput,
            Self::IncompleteCandidate { .. } => ErrorKind::IncompleteCandidate,
            Self::EmbeddingError(_) => ErrorKind::Embedding,
            Self::ClusteringError(_) => ErrorKind::Clustering,
            Self::ScoringError(_) => ErrorKind::Scoring,
            Self::ConfigError(_) => ErrorKind::Config,
        }
    }

    /// The RICE field an `InvalidScoreInput` refers to.
    pub fn offending_field(&self) -> Option<RiceField> {
        match self {
            Self::InvalidScoreInput { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Attach the cluster index to an `InvalidScoreInput` raised by a pure
    /// scoring call. Other variants pass through unchanged.
    pub fn in_cluster(self, index: usize) -> Self {
        match self {
            Self::InvalidScoreInput {
                field,
                value,
                reason,
                cluster: None,
            } => Self::InvalidScoreInput {
                field,
                value,
                reason,
                cluster: Some(index),
            },
            other => other,
        }
    }
}

fn join_fields(fields: &[RiceField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
