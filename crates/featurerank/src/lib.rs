//! # featurerank
//!
//! Turns a snapshot of free-text product feedback into a ranked list of
//! feature candidates.
//!
//! ```text
//! feedback → embed → k-means → aggregate → RICE score → rank → top-N
//! ```
//!
//! [`FeaturePipeline`] exposes the two entry points,
//! [`cluster_and_score`](FeaturePipeline::cluster_and_score) and
//! [`embed_only`](FeaturePipeline::embed_only). Every run is a pure function
//! of its input and configuration.

pub mod observability;
pub mod pipeline;

pub use featurerank_core::{
    config::FeatureRankConfig,
    errors::{ErrorKind, FeatureRankError, FeatureRankResult},
    models::{
        ClusterAssignment, EmbeddingVector, FeatureCandidate, FeedbackItem, OverrideKey,
        PartialRice, PrioritizationReport, PriorityLevel, RiceField, RiceInputs, RiceOverrides,
        RunSummary, ScoredFeature, SkipReason, SkippedCandidate,
    },
    traits::{ClusterView, IEmbeddingProvider, IThemeNamer},
};
pub use observability::init_tracing;
pub use pipeline::FeaturePipeline;
