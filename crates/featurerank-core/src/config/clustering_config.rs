use serde::{Deserialize, Serialize};

use super::defaults;

/// Distance used for centroid assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Squared Euclidean distance.
    #[default]
    Euclidean,
    /// `1 - cosine_similarity`.
    Cosine,
}

/// Strategy used to name a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeStrategy {
    /// Feedback text nearest to the cluster centroid.
    #[default]
    CentroidNearest,
    /// Most distinctive TF-IDF terms of the cluster.
    KeywordFrequency,
    /// Shortest feedback text in the cluster.
    ShortestText,
}

/// Cluster engine and aggregator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Target cluster count.
    pub k: usize,
    /// Minimum number of feedback items before clustering is attempted.
    pub min_items: usize,
    /// Seed for k-means++ initialization.
    pub seed: u64,
    /// Number of k-means restarts; the lowest-inertia run wins.
    pub n_init: usize,
    /// Lloyd iteration cap per restart.
    pub max_iterations: usize,
    /// Convergence threshold on the largest centroid shift.
    pub tolerance: f64,
    pub distance: DistanceMetric,
    pub theme_strategy: ThemeStrategy,
    /// Example texts kept per candidate.
    pub max_examples: usize,
    /// Themes longer than this are truncated with "...".
    pub max_theme_chars: usize,
    /// Keywords kept per candidate.
    pub max_keywords: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            k: defaults::DEFAULT_CLUSTER_COUNT,
            min_items: defaults::DEFAULT_MIN_ITEMS,
            seed: defaults::DEFAULT_SEED,
            n_init: defaults::DEFAULT_N_INIT,
            max_iterations: defaults::DEFAULT_MAX_ITERATIONS,
            tolerance: defaults::DEFAULT_TOLERANCE,
            distance: DistanceMetric::default(),
            theme_strategy: ThemeStrategy::default(),
            max_examples: defaults::DEFAULT_MAX_EXAMPLES,
            max_theme_chars: defaults::DEFAULT_MAX_THEME_CHARS,
            max_keywords: defaults::DEFAULT_MAX_KEYWORDS,
        }
    }
}
