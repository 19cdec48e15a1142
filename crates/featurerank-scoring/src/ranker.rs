//! Deterministic top-N ranking.

use std::cmp::Ordering;

use featurerank_core::models::ScoredFeature;

/// Score descending, then feedback count descending, then cluster index
/// ascending.
pub fn ranking_order(a: &ScoredFeature, b: &ScoredFeature) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.feedback_count().cmp(&a.feedback_count()))
        .then_with(|| a.cluster_index().cmp(&b.cluster_index()))
}

/// Sort by [`ranking_order`] and keep the first `top_n`. Fewer than
/// `top_n` features is a normal result; `top_n == 0` yields nothing.
pub fn rank(mut features: Vec<ScoredFeature>, top_n: usize) -> Vec<ScoredFeature> {
    features.sort_by(ranking_order);
    features.truncate(top_n);
    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use featurerank_core::models::{FeatureCandidate, PartialRice, PriorityLevel, RiceInputs};

    fn scored(cluster_index: usize, score: f64, count: usize) -> ScoredFeature {
        ScoredFeature {
            candidate: FeatureCandidate {
                cluster_index,
                theme: format!("c{cluster_index}"),
                member_ids: (0..count).map(|i| format!("fb-{cluster_index}-{i}")).collect(),
                feedback_count: count,
                examples: vec![],
                keywords: vec![],
                rice: PartialRice::new(),
            },
            rice: RiceInputs::new(count as i64, 1.0, 100.0, 1.0),
            score,
            priority: PriorityLevel::Low,
        }
    }

    #[test]
    fn equal_scores_prefer_higher_count() {
        let features = vec![
            scored(0, 50.0, 3),
            scored(1, 200.0, 5),
            scored(2, 200.0, 2),
            scored(3, 10.0, 1),
        ];
        let top = rank(features, 2);
        assert_eq!(top.len(), 2);
        assert_eq!((top[0].score, top[0].feedback_count()), (200.0, 5));
        assert_eq!((top[1].score, top[1].feedback_count()), (200.0, 2));
    }

    #[test]
    fn full_tie_uses_cluster_index() {
        let top = rank(vec![scored(4, 1.0, 1), scored(1, 1.0, 1), scored(3, 1.0, 1)], 5);
        let order: Vec<usize> = top.iter().map(|f| f.cluster_index()).collect();
        assert_eq!(order, vec![1, 3, 4]);
    }

    #[test]
    fn boundaries() {
        assert!(rank(vec![scored(0, 1.0, 1)], 0).is_empty());
        assert_eq!(rank(vec![scored(0, 1.0, 1)], 5).len(), 1);
        assert!(rank(Vec::new(), 3).is_empty());
    }
}
