//! # featurerank-core
//!
//! Foundation crate for the featurerank pipeline.
//! Defines the feedback and feature models, provider traits, errors,
//! config, and defaults. Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod text;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::FeatureRankConfig;
pub use errors::{ErrorKind, FeatureRankError, FeatureRankResult};
pub use models::{
    ClusterAssignment, EmbeddingVector, FeatureCandidate, FeedbackItem, OverrideKey, PartialRice,
    PrioritizationReport, PriorityLevel, RiceField, RiceInputs, RiceOverrides, ScoredFeature,
    SkipReason, SkippedCandidate,
};
