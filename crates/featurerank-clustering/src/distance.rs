//! Distance helpers over `f32` vectors, accumulated in `f64`.

use featurerank_core::config::DistanceMetric;

/// Squared Euclidean distance.
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = *x as f64 - *y as f64;
            d * d
        })
        .sum()
}

/// Cosine similarity in [-1, 1].
/// Returns 0.0 for empty, mismatched or zero-magnitude vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Distance under `metric`; never negative.
pub fn distance(metric: DistanceMetric, a: &[f32], b: &[f32]) -> f64 {
    match metric {
        DistanceMetric::Euclidean => squared_euclidean(a, b),
        DistanceMetric::Cosine => (1.0 - cosine_similarity(a, b)).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_have_similarity_one() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
        assert!(distance(DistanceMetric::Cosine, &v, &v) < 1e-9);
    }

    #[test]
    fn orthogonal_vectors_have_cosine_distance_one() {
        let d = distance(DistanceMetric::Cosine, &[1.0, 0.0], &[0.0, 1.0]);
        assert!((d - 1.0).abs() < 1e-9);
    }

    #[test]
    fn squared_euclidean_matches_hand_computation() {
        assert_eq!(squared_euclidean(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(distance(DistanceMetric::Euclidean, &[1.0], &[1.0]), 0.0);
    }

    #[test]
    fn degenerate_inputs_return_zero_similarity() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }
}
