use std::fmt;

use serde::{Deserialize, Serialize};

use super::candidate::FeatureCandidate;
use super::rice::RiceInputs;

/// Coarse bucket for a RICE score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    /// `High` at or above `high`, `Medium` at or above `medium`, else `Low`.
    pub fn from_score(score: f64, high: f64, medium: f64) -> Self {
        if score >= high {
            Self::High
        } else if score >= medium {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        })
    }
}

/// A feature candidate with validated RICE inputs and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFeature {
    pub candidate: FeatureCandidate,
    pub rice: RiceInputs,
    /// `(reach * impact * confidence / 100) / effort`.
    pub score: f64,
    pub priority: PriorityLevel,
}

impl ScoredFeature {
    pub fn cluster_index(&self) -> usize {
        self.candidate.cluster_index
    }

    pub fn feedback_count(&self) -> usize {
        self.candidate.feedback_count
    }

    pub fn theme(&self) -> &str {
        &self.candidate.theme
    }
}
