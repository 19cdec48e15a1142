use serde::{Deserialize, Serialize};

use super::cluster::ClusterAssignment;
use super::overrides::OverrideKey;
use super::rice::RiceField;
use super::scored::ScoredFeature;

/// Why a candidate was left out of the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Required RICE fields were never supplied.
    Incomplete { missing: Vec<RiceField> },
}

/// A candidate excluded from ranking, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub cluster_index: usize,
    pub theme: String,
    pub feedback_count: usize,
    pub reason: SkipReason,
}

/// Counters describing one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub feedback_count: usize,
    /// Requested cluster count.
    pub requested_k: usize,
    /// Cluster count after clamping.
    pub effective_k: usize,
    pub total_candidates: usize,
    pub scored: usize,
    pub skipped: usize,
    /// Overrides that addressed no cluster of this run.
    pub unmatched_overrides: Vec<OverrideKey>,
}

/// Output of `cluster_and_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizationReport {
    /// Top-N features, best first.
    pub ranked: Vec<ScoredFeature>,
    pub skipped: Vec<SkippedCandidate>,
    pub assignment: ClusterAssignment,
    pub summary: RunSummary,
}
