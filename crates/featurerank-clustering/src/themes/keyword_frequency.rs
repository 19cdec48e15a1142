use std::collections::{BTreeMap, HashSet};

use featurerank_core::traits::{ClusterView, IThemeNamer};

use super::shortest_text::ShortestText;
use crate::keywords::tokenize;

/// Names a cluster by the significant terms most of its members share,
/// e.g. `"dark, mode"`.
#[derive(Debug, Clone, Copy)]
pub struct KeywordFrequency {
    terms: usize,
}

impl KeywordFrequency {
    pub fn new(terms: usize) -> Self {
        Self {
            terms: terms.max(1),
        }
    }
}

impl Default for KeywordFrequency {
    fn default() -> Self {
        Self::new(3)
    }
}

impl IThemeNamer for KeywordFrequency {
    fn name(&self) -> &str {
        "keyword_frequency"
    }

    fn synthesize(&self, cluster: &ClusterView<'_>) -> String {
        // Members containing each term; BTreeMap keeps equal counts alphabetical.
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for text in &cluster.texts {
            let unique: HashSet<String> = tokenize(text).into_iter().collect();
            for term in unique {
                *counts.entry(term).or_insert(0) += 1;
            }
        }
        if counts.is_empty() {
            return ShortestText::pick(&cluster.texts)
                .unwrap_or_default()
                .to_string();
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(self.terms)
            .map(|(term, _)| term)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
