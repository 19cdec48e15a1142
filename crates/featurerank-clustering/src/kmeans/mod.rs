//! Seeded k-means with k-means++ initialization and restarts.
//!
//! Restart seeds are drawn sequentially from one master `ChaCha8Rng`, so the
//! chosen partition does not depend on how rayon schedules the restarts.

pub mod init;
pub mod lloyd;

use featurerank_core::config::{ClusteringConfig, DistanceMetric};
use featurerank_core::models::EmbeddingVector;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

pub use lloyd::{nearest_centroid, LloydOutcome, LloydParams};

/// k-means solver for a fixed cluster count.
#[derive(Debug, Clone)]
pub struct KMeans {
    k: usize,
    n_init: usize,
    seed: u64,
    params: LloydParams,
}

impl KMeans {
    pub fn new(k: usize, config: &ClusteringConfig) -> Self {
        Self {
            k,
            n_init: config.n_init.max(1),
            seed: config.seed,
            params: LloydParams {
                metric: config.distance,
                max_iterations: config.max_iterations.max(1),
                tolerance: config.tolerance,
            },
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn metric(&self) -> DistanceMetric {
        self.params.metric
    }

    /// Partition `vectors` into `k` clusters.
    ///
    /// Callers guarantee `1 <= k` and at least `k` distinct vectors of equal
    /// dimension. Labels come back canonicalized by first appearance.
    pub fn fit(&self, vectors: &[EmbeddingVector]) -> LloydOutcome {
        let mut master = ChaCha8Rng::seed_from_u64(self.seed);
        let seeds: Vec<u64> = (0..self.n_init).map(|_| master.next_u64()).collect();

        let runs: Vec<LloydOutcome> = seeds
            .par_iter()
            .map(|&seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let initial = init::kmeans_plus_plus(vectors, self.k, self.params.metric, &mut rng);
                lloyd::lloyd(vectors, initial, self.params)
            })
            .collect();

        // Earliest restart wins on equal inertia.
        let mut best: Option<LloydOutcome> = None;
        for (restart, run) in runs.into_iter().enumerate() {
            debug!(
                restart,
                inertia = run.inertia,
                iterations = run.iterations,
                converged = run.converged,
                "k-means restart finished"
            );
            let better = best
                .as_ref()
                .map_or(true, |b| run.inertia.total_cmp(&b.inertia).is_lt());
            if better {
                best = Some(run);
            }
        }

        match best {
            Some(run) => canonicalize(run),
            None => LloydOutcome {
                labels: Vec::new(),
                centroids: Vec::new(),
                inertia: 0.0,
                iterations: 0,
                converged: true,
            },
        }
    }
}

/// Relabel clusters in order of first appearance. Clusters that ended up
/// empty take the remaining labels in their original order.
pub fn canonicalize(outcome: LloydOutcome) -> LloydOutcome {
    let k = outcome.centroids.len();
    let mut mapping: Vec<Option<usize>> = vec![None; k];
    let mut next = 0;
    for &l in &outcome.labels {
        if mapping[l].is_none() {
            mapping[l] = Some(next);
            next += 1;
        }
    }
    for slot in mapping.iter_mut() {
        if slot.is_none() {
            *slot = Some(next);
            next += 1;
        }
    }
    let mapping: Vec<usize> = mapping.into_iter().flatten().collect();

    let mut centroids = vec![Vec::new(); k];
    for (old, centroid) in outcome.centroids.into_iter().enumerate() {
        centroids[mapping[old]] = centroid;
    }
    LloydOutcome {
        labels: outcome.labels.iter().map(|&l| mapping[l]).collect(),
        centroids,
        ..outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blobs() -> Vec<EmbeddingVector> {
        let mut v = Vec::new();
        for i in 0..5 {
            let jitter = i as f32 * 0.01;
            v.push(vec![10.0 + jitter, 10.0]);
            v.push(vec![0.0 + jitter, 0.0]);
            v.push(vec![-10.0 + jitter, 10.0]);
        }
        v
    }

    #[test]
    fn canonical_labels_follow_first_appearance() {
        let out = canonicalize(LloydOutcome {
            labels: vec![2, 2, 0, 2],
            centroids: vec![vec![0.0], vec![1.0], vec![2.0]],
            inertia: 0.0,
            iterations: 1,
            converged: true,
        });
        assert_eq!(out.labels, vec![0, 0, 1, 0]);
        assert_eq!(out.centroids, vec![vec![2.0], vec![0.0], vec![1.0]]);
    }

    #[test]
    fn finds_three_blobs() {
        let config = ClusteringConfig::default();
        let out = KMeans::new(3, &config).fit(&blobs());
        assert_eq!(&out.labels[..3], &[0, 1, 2]);
        for (i, &l) in out.labels.iter().enumerate() {
            assert_eq!(l, i % 3);
        }
    }

    #[test]
    fn fit_is_deterministic() {
        let config = ClusteringConfig {
            n_init: 4,
            ..ClusteringConfig::default()
        };
        let vectors: Vec<EmbeddingVector> = (0..40)
            .map(|i| vec![(i % 7) as f32, (i * 13 % 11) as f32, (i % 3) as f32])
            .collect();
        let a = KMeans::new(4, &config).fit(&vectors);
        let b = KMeans::new(4, &config).fit(&vectors);
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.centroids, b.centroids);
        assert_eq!(a.inertia.to_bits(), b.inertia.to_bits());
    }
}
