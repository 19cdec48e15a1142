/// Cluster engine errors.
#[derive(Debug, thiserror::Error)]
pub enum ClusteringError {
    #[error("invalid cluster count: {k}")]
    InvalidClusterCount { k: usize },

    #[error("vector {index} has {actual} dimensions, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("vector {index} contains a non-finite component")]
    NonFiniteVector { index: usize },

    #[error("assignment covers {labels} items but {items} were supplied")]
    AssignmentMismatch { labels: usize, items: usize },
}
