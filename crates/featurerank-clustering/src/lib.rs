//! # featurerank-clustering
//!
//! Vector partitioning and cluster → feature candidate aggregation.
//!
//! - [`ClusterEngine`]: seeded k-means++ with restarts, lowest-index tie
//!   break, labels canonicalized by first appearance.
//! - [`themes`]: swappable theme namers (centroid-nearest, keyword
//!   frequency, shortest text).
//! - [`FeatureAggregator`]: one candidate per non-empty cluster with
//!   examples, keywords and default-plus-override RICE inputs.

pub mod aggregator;
pub mod distance;
pub mod engine;
pub mod keywords;
pub mod kmeans;
pub mod themes;

pub use aggregator::{Aggregation, FeatureAggregator};
pub use engine::{readiness, ClusterEngine, ClusteringReadiness, Partition};
pub use kmeans::KMeans;
