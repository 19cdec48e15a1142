//! Lloyd iterations from a fixed set of initial centroids.

use featurerank_core::config::DistanceMetric;
use featurerank_core::models::EmbeddingVector;

use crate::distance::{distance, squared_euclidean};

/// Result of one k-means run.
#[derive(Debug, Clone)]
pub struct LloydOutcome {
    pub labels: Vec<usize>,
    pub centroids: Vec<EmbeddingVector>,
    /// Sum of member-to-centroid distances under the run's metric.
    pub inertia: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Stopping rules for [`lloyd`].
#[derive(Debug, Clone, Copy)]
pub struct LloydParams {
    pub metric: DistanceMetric,
    pub max_iterations: usize,
    pub tolerance: f64,
}

/// Index of the nearest centroid. Equal distances go to the lower index.
pub fn nearest_centroid(
    metric: DistanceMetric,
    vector: &[f32],
    centroids: &[EmbeddingVector],
) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (c, centroid) in centroids.iter().enumerate() {
        let d = distance(metric, vector, centroid);
        if d < best.1 {
            best = (c, d);
        }
    }
    best
}

/// Run Lloyd's algorithm until the labels stop changing, the largest
/// centroid shift drops to `tolerance`, or `max_iterations` is reached.
pub fn lloyd(
    vectors: &[EmbeddingVector],
    initial: Vec<EmbeddingVector>,
    params: LloydParams,
) -> LloydOutcome {
    let k = initial.len();
    let mut centroids = initial;
    let mut labels = assign(vectors, &centroids, params.metric);
    let mut iterations = 0;
    let mut converged = false;

    while iterations < params.max_iterations {
        iterations += 1;

        let mut next = recompute(vectors, &labels, k, &centroids);
        repair_empty(vectors, &mut labels, &mut next, params.metric);

        let shift = centroids
            .iter()
            .zip(&next)
            .map(|(old, new)| squared_euclidean(old, new).sqrt())
            .fold(0.0f64, f64::max);
        centroids = next;

        let relabeled = assign(vectors, &centroids, params.metric);
        let stable = relabeled == labels;
        labels = relabeled;

        if stable || shift <= params.tolerance {
            converged = true;
            break;
        }
    }

    // The last relabel may have emptied a cluster, and repairs may have
    // moved labels after the last mean update.
    repair_empty(vectors, &mut labels, &mut centroids, params.metric);
    centroids = recompute(vectors, &labels, k, &centroids);
    let inertia = vectors
        .iter()
        .zip(&labels)
        .map(|(v, &l)| distance(params.metric, v, &centroids[l]))
        .sum();

    LloydOutcome {
        labels,
        centroids,
        inertia,
        iterations,
        converged,
    }
}

fn assign(
    vectors: &[EmbeddingVector],
    centroids: &[EmbeddingVector],
    metric: DistanceMetric,
) -> Vec<usize> {
    vectors
        .iter()
        .map(|v| nearest_centroid(metric, v, centroids).0)
        .collect()
}

/// Member means accumulated in f64. Empty clusters keep their old centroid
/// until [`repair_empty`] moves a point into them.
fn recompute(
    vectors: &[EmbeddingVector],
    labels: &[usize],
    k: usize,
    previous: &[EmbeddingVector],
) -> Vec<EmbeddingVector> {
    let dims = previous.first().map_or(0, Vec::len);
    let mut sums = vec![vec![0.0f64; dims]; k];
    let mut counts = vec![0usize; k];
    for (v, &l) in vectors.iter().zip(labels) {
        counts[l] += 1;
        for (acc, x) in sums[l].iter_mut().zip(v) {
            *acc += *x as f64;
        }
    }

    sums.into_iter()
        .zip(counts)
        .enumerate()
        .map(|(c, (sum, count))| {
            if count == 0 {
                previous[c].clone()
            } else {
                sum.into_iter().map(|s| (s / count as f64) as f32).collect()
            }
        })
        .collect()
}

/// Give every empty cluster the point farthest from its own centroid,
/// taken from a cluster that keeps at least one member.
fn repair_empty(
    vectors: &[EmbeddingVector],
    labels: &mut [usize],
    centroids: &mut [EmbeddingVector],
    metric: DistanceMetric,
) {
    let k = centroids.len();
    let mut counts = vec![0usize; k];
    for &l in labels.iter() {
        counts[l] += 1;
    }

    for empty in 0..k {
        if counts[empty] > 0 {
            continue;
        }
        let mut donor: Option<(usize, f64)> = None;
        for (i, v) in vectors.iter().enumerate() {
            let l = labels[i];
            if counts[l] <= 1 {
                continue;
            }
            let d = distance(metric, v, &centroids[l]);
            if donor.map_or(true, |(_, best)| d > best) {
                donor = Some((i, d));
            }
        }
        let Some((i, _)) = donor else {
            break;
        };
        counts[labels[i]] -= 1;
        labels[i] = empty;
        counts[empty] = 1;
        centroids[empty] = vectors[i].clone();
    }
}
