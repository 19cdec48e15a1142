//! RICE score computation and input validation.

use featurerank_core::config::ScoringConfig;
use featurerank_core::errors::{FeatureRankError, FeatureRankResult, ScoringError};
use featurerank_core::models::{
    FeatureCandidate, PriorityLevel, RiceField, RiceInputs, ScoredFeature, SkipReason,
    SkippedCandidate,
};
use tracing::debug;

const IMPACT_SCALE: std::ops::RangeInclusive<f64> = 1.0..=5.0;

fn invalid(field: RiceField, value: f64, reason: &str) -> FeatureRankError {
    FeatureRankError::InvalidScoreInput {
        field,
        value,
        reason: reason.to_string(),
        cluster: None,
    }
}

/// Check every field against its valid range, in RICE order.
///
/// With `strict_impact` the impact must lie in the 1–5 ordinal scale;
/// otherwise any positive finite value is accepted.
pub fn validate_inputs(inputs: &RiceInputs, strict_impact: bool) -> FeatureRankResult<()> {
    if inputs.reach < 0 {
        return Err(invalid(RiceField::Reach, inputs.reach as f64, "must be >= 0"));
    }
    let impact = inputs.impact;
    if !impact.is_finite() || impact <= 0.0 {
        return Err(invalid(RiceField::Impact, impact, "must be a positive number"));
    }
    if strict_impact && !IMPACT_SCALE.contains(&impact) {
        return Err(invalid(RiceField::Impact, impact, "must be within [1, 5]"));
    }
    let confidence = inputs.confidence;
    if !(0.0..=100.0).contains(&confidence) {
        return Err(invalid(
            RiceField::Confidence,
            confidence,
            "must be within [0, 100]",
        ));
    }
    let effort = inputs.effort;
    if !effort.is_finite() || effort <= 0.0 {
        return Err(invalid(RiceField::Effort, effort, "must be greater than 0"));
    }
    Ok(())
}

/// `(reach * impact * confidence / 100) / effort`, after validation.
pub fn rice_score(inputs: &RiceInputs, strict_impact: bool) -> FeatureRankResult<f64> {
    validate_inputs(inputs, strict_impact)?;
    let score =
        (inputs.reach as f64 * inputs.impact * inputs.confidence / 100.0) / inputs.effort;
    if !score.is_finite() {
        return Err(ScoringError::NonFiniteScore { value: score }.into());
    }
    Ok(score)
}

/// Candidates split into scored and skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringOutcome {
    pub scored: Vec<ScoredFeature>,
    pub skipped: Vec<SkippedCandidate>,
}

/// Pure candidate → scored feature conversion.
#[derive(Debug, Clone, Default)]
pub struct RiceScorer {
    config: ScoringConfig,
}

impl RiceScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one candidate.
    ///
    /// Fails with `IncompleteCandidate` while a RICE field is unset and with
    /// `InvalidScoreInput` (tagged with the cluster) when a field is out of
    /// range.
    pub fn score(&self, candidate: &FeatureCandidate) -> FeatureRankResult<ScoredFeature> {
        let rice = candidate
            .rice
            .complete()
            .ok_or_else(|| FeatureRankError::IncompleteCandidate {
                cluster: candidate.cluster_index,
                missing: candidate.missing_fields(),
            })?;
        let score = rice_score(&rice, self.config.strict_impact_scale)
            .map_err(|e| e.in_cluster(candidate.cluster_index))?;
        let priority = PriorityLevel::from_score(
            score,
            self.config.high_threshold,
            self.config.medium_threshold,
        );
        Ok(ScoredFeature {
            candidate: candidate.clone(),
            rice,
            score,
            priority,
        })
    }

    /// Score every candidate. Incomplete candidates are skipped with a
    /// reason; any other error aborts.
    pub fn score_all(&self, candidates: Vec<FeatureCandidate>) -> FeatureRankResult<ScoringOutcome> {
        let mut outcome = ScoringOutcome::default();
        for candidate in candidates {
            match self.score(&candidate) {
                Ok(scored) => {
                    debug!(
                        cluster = candidate.cluster_index,
                        score = scored.score,
                        priority = %scored.priority,
                        "candidate scored"
                    );
                    outcome.scored.push(scored);
                }
                Err(FeatureRankError::IncompleteCandidate { missing, .. }) => {
                    debug!(
                        cluster = candidate.cluster_index,
                        missing = ?missing,
                        "candidate skipped"
                    );
                    outcome.skipped.push(SkippedCandidate {
                        cluster_index: candidate.cluster_index,
                        theme: candidate.theme,
                        feedback_count: candidate.feedback_count,
                        reason: SkipReason::Incomplete { missing },
                    });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(outcome)
    }
}
