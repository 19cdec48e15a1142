use serde::{Deserialize, Serialize};

use super::rice::{PartialRice, RiceField};

/// The aggregated representation of one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCandidate {
    pub cluster_index: usize,
    /// Human-readable name synthesized from the cluster's feedback.
    pub theme: String,
    /// Ids of the member feedback items, in input order. Never empty.
    pub member_ids: Vec<String>,
    pub feedback_count: usize,
    /// Up to `max_examples` texts, nearest to the centroid first.
    pub examples: Vec<String>,
    /// Distinctive terms of the cluster, most distinctive first.
    pub keywords: Vec<String>,
    /// Defaults merged with caller overrides.
    pub rice: PartialRice,
}

impl FeatureCandidate {
    /// A candidate is incomplete while any RICE field is unset.
    pub fn is_complete(&self) -> bool {
        self.rice.is_complete()
    }

    pub fn missing_fields(&self) -> Vec<RiceField> {
        self.rice.missing_fields()
    }
}
