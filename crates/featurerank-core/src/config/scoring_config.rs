use serde::{Deserialize, Serialize};

use super::defaults;

/// RICE scoring and ranking configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Confidence (percent) applied when the caller supplies none.
    pub default_confidence: f64,
    /// Number of features returned by the ranker.
    pub top_n: usize,
    /// Scores at or above this are `High` priority.
    pub high_threshold: f64,
    /// Scores at or above this are `Medium` priority.
    pub medium_threshold: f64,
    /// Reject impact values outside the 1–5 ordinal scale.
    pub strict_impact_scale: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_confidence: defaults::DEFAULT_CONFIDENCE,
            top_n: defaults::DEFAULT_TOP_N,
            high_threshold: defaults::DEFAULT_HIGH_THRESHOLD,
            medium_threshold: defaults::DEFAULT_MEDIUM_THRESHOLD,
            strict_impact_scale: defaults::DEFAULT_STRICT_IMPACT_SCALE,
        }
    }
}
