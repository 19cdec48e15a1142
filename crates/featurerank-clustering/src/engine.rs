//! Cluster Engine: validation, k clamping and the k-means call.

use std::collections::HashSet;

use featurerank_core::config::ClusteringConfig;
use featurerank_core::errors::{ClusteringError, FeatureRankError, FeatureRankResult};
use featurerank_core::models::{ClusterAssignment, EmbeddingVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::kmeans::KMeans;

/// A labelled partition of the input vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// One label in `[0, k)` per input vector, canonicalized by first
    /// appearance.
    pub labels: Vec<usize>,
    /// One centroid per label.
    pub centroids: Vec<EmbeddingVector>,
    /// Cluster count asked for by the caller (or config).
    pub requested_k: usize,
    /// Cluster count actually used after clamping.
    pub k: usize,
    pub inertia: f64,
    pub iterations: usize,
    pub converged: bool,
}

impl Partition {
    /// Pair the labels with the feedback ids they were computed for.
    pub fn to_assignment(&self, ids: Vec<String>) -> FeatureRankResult<ClusterAssignment> {
        ClusterAssignment::new(ids, self.labels.clone(), self.k)
    }
}

/// Whether enough feedback has been collected to cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusteringReadiness {
    pub feedback_count: usize,
    pub min_required: usize,
    pub can_cluster: bool,
}

pub fn readiness(feedback_count: usize, config: &ClusteringConfig) -> ClusteringReadiness {
    let min_required = config.min_items.max(1);
    ClusteringReadiness {
        feedback_count,
        min_required,
        can_cluster: feedback_count >= min_required,
    }
}

/// Partitions embedding vectors with seeded k-means.
#[derive(Debug, Clone, Default)]
pub struct ClusterEngine {
    config: ClusteringConfig,
}

impl ClusterEngine {
    pub fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Partition `vectors` into `k` clusters (config `k` when `None`).
    ///
    /// `k` is clamped to the number of vectors and to the number of distinct
    /// vectors, so no cluster starts out as a duplicate of another.
    pub fn partition(
        &self,
        vectors: &[EmbeddingVector],
        k: Option<usize>,
    ) -> FeatureRankResult<Partition> {
        let ready = readiness(vectors.len(), &self.config);
        if !ready.can_cluster {
            return Err(FeatureRankError::InsufficientData {
                available: ready.feedback_count,
                required: ready.min_required,
            });
        }

        let requested_k = k.unwrap_or(self.config.k);
        if requested_k == 0 {
            return Err(ClusteringError::InvalidClusterCount { k: requested_k }.into());
        }
        validate_vectors(vectors)?;

        let distinct = distinct_count(vectors);
        let effective_k = requested_k.min(vectors.len()).min(distinct);
        if effective_k != requested_k {
            debug!(
                requested_k,
                effective_k,
                items = vectors.len(),
                distinct,
                "cluster count clamped"
            );
        }

        let outcome = KMeans::new(effective_k, &self.config).fit(vectors);
        info!(
            items = vectors.len(),
            k = effective_k,
            inertia = outcome.inertia,
            iterations = outcome.iterations,
            converged = outcome.converged,
            "partition complete"
        );

        Ok(Partition {
            labels: outcome.labels,
            centroids: outcome.centroids,
            requested_k,
            k: effective_k,
            inertia: outcome.inertia,
            iterations: outcome.iterations,
            converged: outcome.converged,
        })
    }
}

fn validate_vectors(vectors: &[EmbeddingVector]) -> FeatureRankResult<()> {
    let expected = vectors.first().map_or(0, Vec::len);
    for (index, v) in vectors.iter().enumerate() {
        if v.len() != expected {
            return Err(ClusteringError::DimensionMismatch {
                index,
                expected,
                actual: v.len(),
            }
            .into());
        }
        if v.iter().any(|x| !x.is_finite()) {
            return Err(ClusteringError::NonFiniteVector { index }.into());
        }
    }
    Ok(())
}

/// Distinct vectors by bit pattern, with `-0.0` folded into `0.0`.
fn distinct_count(vectors: &[EmbeddingVector]) -> usize {
    vectors
        .iter()
        .map(|v| v.iter().map(|x| (x + 0.0).to_bits()).collect::<Vec<u32>>())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use featurerank_core::errors::ErrorKind;

    fn engine() -> ClusterEngine {
        ClusterEngine::new(ClusteringConfig::default())
    }

    #[test]
    fn single_item_is_insufficient() {
        let err = engine().partition(&[vec![1.0, 0.0]], None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn readiness_reports_threshold() {
        let config = ClusteringConfig {
            min_items: 3,
            ..ClusteringConfig::default()
        };
        assert!(!readiness(2, &config).can_cluster);
        let r = readiness(3, &config);
        assert!(r.can_cluster);
        assert_eq!(r.min_required, 3);
    }

    #[test]
    fn zero_k_is_rejected() {
        let err = engine()
            .partition(&[vec![0.0], vec![1.0]], Some(0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Clustering);
    }

    #[test]
    fn k_clamped_to_item_count() {
        let p = engine()
            .partition(&[vec![0.0], vec![1.0], vec![2.0]], Some(10))
            .unwrap();
        assert_eq!(p.requested_k, 10);
        assert_eq!(p.k, 3);
        assert_eq!(p.labels, vec![0, 1, 2]);
    }

    #[test]
    fn k_clamped_to_distinct_vectors() {
        let vectors = vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![-0.0, 0.0], vec![0.0, 0.0]];
        let p = engine().partition(&vectors, Some(4)).unwrap();
        assert_eq!(p.k, 2);
        assert_eq!(p.labels, vec![0, 0, 1, 1]);
    }

    #[test]
    fn mismatched_dimensions_rejected() {
        let err = engine()
            .partition(&[vec![0.0, 1.0], vec![1.0]], Some(2))
            .unwrap_err();
        assert!(matches!(
            err,
            FeatureRankError::ClusteringError(ClusteringError::DimensionMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn nan_rejected() {
        let err = engine()
            .partition(&[vec![0.0], vec![f32::NAN]], Some(2))
            .unwrap_err();
        assert!(matches!(
            err,
            FeatureRankError::ClusteringError(ClusteringError::NonFiniteVector { index: 1 })
        ));
    }
}
