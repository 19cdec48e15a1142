//! k-means++ seeding.
//!
//! The first centroid is drawn uniformly; each next one with probability
//! proportional to its distance from the nearest centroid chosen so far.

use featurerank_core::config::DistanceMetric;
use featurerank_core::models::EmbeddingVector;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::distance::distance;

/// Pick `k` initial centroids from `vectors`. Requires `1 <= k <= n`.
pub fn kmeans_plus_plus(
    vectors: &[EmbeddingVector],
    k: usize,
    metric: DistanceMetric,
    rng: &mut ChaCha8Rng,
) -> Vec<EmbeddingVector> {
    let n = vectors.len();
    let mut chosen: Vec<usize> = Vec::with_capacity(k);
    chosen.push(rng.random_range(0..n));

    let mut nearest = vec![f64::INFINITY; n];
    while chosen.len() < k {
        let last = &vectors[chosen[chosen.len() - 1]];
        for (i, v) in vectors.iter().enumerate() {
            nearest[i] = nearest[i].min(distance(metric, v, last));
        }

        let total: f64 = nearest.iter().sum();
        let next = if total > 0.0 && total.is_finite() {
            let target = rng.random::<f64>() * total;
            weighted_pick(&nearest, target)
        } else {
            None
        };
        // Every remaining point coincides with a centroid: take the first
        // index not yet used so the centroids stay distinct positions.
        let next = next.or_else(|| (0..n).find(|i| !chosen.contains(i)));
        match next {
            Some(i) => chosen.push(i),
            None => break,
        }
    }

    chosen.into_iter().map(|i| vectors[i].clone()).collect()
}

/// First index whose cumulative weight exceeds `target`, skipping
/// zero-weight entries.
fn weighted_pick(weights: &[f64], target: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = Some(i);
        if cumulative > target {
            return Some(i);
        }
    }
    last_positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn weighted_pick_skips_zero_weights() {
        let w = [0.0, 1.0, 0.0, 3.0];
        assert_eq!(weighted_pick(&w, 0.5), Some(1));
        assert_eq!(weighted_pick(&w, 1.5), Some(3));
        assert_eq!(weighted_pick(&w, 10.0), Some(3));
        assert_eq!(weighted_pick(&[0.0, 0.0], 0.0), None);
    }

    #[test]
    fn picks_k_distinct_points_for_separated_data() {
        let vectors = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![10.0, 10.0],
            vec![10.0, 10.1],
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let centroids = kmeans_plus_plus(&vectors, 2, DistanceMetric::Euclidean, &mut rng);
        assert_eq!(centroids.len(), 2);
        let near_origin = centroids.iter().filter(|c| c[0] < 5.0).count();
        assert_eq!(near_origin, 1, "one centroid per blob expected");
    }

    #[test]
    fn same_seed_same_centroids() {
        let vectors: Vec<EmbeddingVector> =
            (0..20).map(|i| vec![i as f32, (i * i % 7) as f32]).collect();
        let a = kmeans_plus_plus(
            &vectors,
            4,
            DistanceMetric::Euclidean,
            &mut ChaCha8Rng::seed_from_u64(7),
        );
        let b = kmeans_plus_plus(
            &vectors,
            4,
            DistanceMetric::Euclidean,
            &mut ChaCha8Rng::seed_from_u64(7),
        );
        assert_eq!(a, b);
    }
}
