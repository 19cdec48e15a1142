use std::fmt;

use serde::{Deserialize, Serialize};

use super::rice::PartialRice;

/// Addresses the cluster an override applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideKey {
    /// Cluster index of the current run.
    Cluster(usize),
    /// Synthesized theme; matched case-insensitively after trimming.
    Theme(String),
}

impl OverrideKey {
    /// Whether this key addresses the cluster with the given index and theme.
    pub fn matches(&self, cluster_index: usize, theme: &str) -> bool {
        match self {
            Self::Cluster(index) => *index == cluster_index,
            Self::Theme(wanted) => wanted.trim().to_lowercase() == theme.trim().to_lowercase(),
        }
    }
}

impl fmt::Display for OverrideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cluster(index) => write!(f, "cluster #{index}"),
            Self::Theme(theme) => write!(f, "theme {theme:?}"),
        }
    }
}

/// Caller-supplied RICE inputs per cluster.
///
/// Theme matches are applied before index matches; within each group later
/// entries win over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiceOverrides {
    pub entries: Vec<(OverrideKey, PartialRice)>,
}

impl RiceOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_cluster(mut self, index: usize, rice: PartialRice) -> Self {
        self.entries.push((OverrideKey::Cluster(index), rice));
        self
    }

    pub fn for_theme(mut self, theme: impl Into<String>, rice: PartialRice) -> Self {
        self.entries.push((OverrideKey::Theme(theme.into()), rice));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Apply every matching entry onto `base`. Returns the indices of the
    /// entries that matched.
    pub fn apply(&self, cluster_index: usize, theme: &str, base: &mut PartialRice) -> Vec<usize> {
        let mut matched = Vec::new();
        let theme_pass = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, (key, _))| matches!(key, OverrideKey::Theme(_)));
        let index_pass = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, (key, _))| matches!(key, OverrideKey::Cluster(_)));

        for (i, (key, rice)) in theme_pass.chain(index_pass) {
            if key.matches(cluster_index, theme) {
                base.merge(rice);
                matched.push(i);
            }
        }
        matched
    }
}
