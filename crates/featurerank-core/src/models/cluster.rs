use serde::{Deserialize, Serialize};

use crate::errors::{ClusteringError, FeatureRankError, FeatureRankResult};

/// Mapping from feedback id to cluster index in `[0, k)`.
///
/// `ids` and `labels` are parallel and follow the input order of the run.
/// Deserialization goes through [`ClusterAssignment::new`], so a decoded
/// assignment upholds the same invariants as a constructed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAssignment")]
pub struct ClusterAssignment {
    k: usize,
    ids: Vec<String>,
    labels: Vec<usize>,
}

#[derive(Deserialize)]
struct RawAssignment {
    k: usize,
    ids: Vec<String>,
    labels: Vec<usize>,
}

impl TryFrom<RawAssignment> for ClusterAssignment {
    type Error = FeatureRankError;

    fn try_from(raw: RawAssignment) -> Result<Self, Self::Error> {
        Self::new(raw.ids, raw.labels, raw.k)
    }
}

impl ClusterAssignment {
    /// Build an assignment, checking that every label is below `k`.
    pub fn new(ids: Vec<String>, labels: Vec<usize>, k: usize) -> FeatureRankResult<Self> {
        if ids.len() != labels.len() {
            return Err(ClusteringError::AssignmentMismatch {
                labels: labels.len(),
                items: ids.len(),
            }
            .into());
        }
        if k == 0 || labels.iter().any(|&l| l >= k) {
            return Err(ClusteringError::InvalidClusterCount { k }.into());
        }
        Ok(Self { k, ids, labels })
    }

    /// Number of clusters, including empty ones.
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Cluster of the given feedback id.
    pub fn cluster_of(&self, id: &str) -> Option<usize> {
        self.ids
            .iter()
            .position(|candidate| candidate == id)
            .map(|i| self.labels[i])
    }

    /// Input indices grouped by cluster. Always `k` groups, possibly empty.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.k];
        for (idx, &label) in self.labels.iter().enumerate() {
            groups[label].push(idx);
        }
        groups
    }

    /// Feedback ids of one cluster, in input order.
    pub fn members(&self, cluster: usize) -> Vec<&str> {
        self.ids
            .iter()
            .zip(&self.labels)
            .filter(|(_, label)| **label == cluster)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Number of clusters with at least one member.
    pub fn non_empty_clusters(&self) -> usize {
        self.groups().iter().filter(|g| !g.is_empty()).count()
    }
}
