//! Span definitions per pipeline stage: run, embedding, clustering, scoring.

/// Create a span for one `cluster_and_score` run.
#[macro_export]
macro_rules! pipeline_span {
    ($items:expr, $k:expr) => {
        tracing::info_span!("featurerank.pipeline", items = $items, k = ?$k)
    };
}

/// Create an embedding span.
#[macro_export]
macro_rules! embedding_span {
    ($provider:expr, $dimension:expr) => {
        tracing::info_span!("featurerank.embedding", provider = %$provider, dimension = $dimension)
    };
}

/// Create a clustering span.
#[macro_export]
macro_rules! clustering_span {
    ($items:expr, $k:expr) => {
        tracing::info_span!("featurerank.clustering", items = $items, k = $k)
    };
}

/// Create a scoring span.
#[macro_export]
macro_rules! scoring_span {
    ($candidates:expr) => {
        tracing::info_span!("featurerank.scoring", candidates = $candidates)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PIPELINE: &str = "featurerank.pipeline";
    pub const EMBEDDING: &str = "featurerank.embedding";
    pub const CLUSTERING: &str = "featurerank.clustering";
    pub const SCORING: &str = "featurerank.scoring";
}
