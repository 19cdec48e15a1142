//! Feature Aggregator: one [`FeatureCandidate`] per non-empty cluster.

use featurerank_core::config::defaults::MAX_EXAMPLES_LIMIT;
use featurerank_core::config::ClusteringConfig;
use featurerank_core::errors::{ClusteringError, FeatureRankResult};
use featurerank_core::models::{
    ClusterAssignment, EmbeddingVector, FeatureCandidate, FeedbackItem, PartialRice,
    RiceOverrides,
};
use featurerank_core::text::truncate_chars;
use featurerank_core::traits::{ClusterView, IThemeNamer};
use tracing::debug;

use crate::distance::distance;
use crate::keywords::KeywordIndex;
use crate::themes::namer_for;

/// Candidates of one run plus which override entries found a cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Ordered by cluster index.
    pub candidates: Vec<FeatureCandidate>,
    /// Parallel to `RiceOverrides::entries`.
    pub matched_overrides: Vec<bool>,
}

impl Aggregation {
    /// Indices of override entries that matched no cluster.
    pub fn unmatched_overrides(&self) -> Vec<usize> {
        self.matched_overrides
            .iter()
            .enumerate()
            .filter(|(_, matched)| !**matched)
            .map(|(i, _)| i)
            .collect()
    }
}

pub struct FeatureAggregator {
    config: ClusteringConfig,
    default_confidence: f64,
    namer: Box<dyn IThemeNamer>,
}

impl FeatureAggregator {
    pub fn new(config: &ClusteringConfig, default_confidence: f64) -> Self {
        Self {
            config: config.clone(),
            default_confidence,
            namer: namer_for(config.theme_strategy, config.distance),
        }
    }

    /// Replace the configured theme namer.
    pub fn with_namer(mut self, namer: Box<dyn IThemeNamer>) -> Self {
        self.namer = namer;
        self
    }

    pub fn namer_name(&self) -> &str {
        self.namer.name()
    }

    /// Build candidates from a cluster assignment.
    ///
    /// `vectors` is parallel to `items` or empty; `centroids`, when given,
    /// is indexed by cluster. Without either, examples keep input order and
    /// the namer sees no centroid.
    pub fn aggregate(
        &self,
        items: &[FeedbackItem],
        assignment: &ClusterAssignment,
        vectors: &[EmbeddingVector],
        centroids: Option<&[EmbeddingVector]>,
        overrides: &RiceOverrides,
    ) -> FeatureRankResult<Aggregation> {
        if assignment.len() != items.len() {
            return Err(ClusteringError::AssignmentMismatch {
                labels: assignment.len(),
                items: items.len(),
            }
            .into());
        }
        let has_vectors = !vectors.is_empty();
        if has_vectors && vectors.len() != items.len() {
            return Err(ClusteringError::AssignmentMismatch {
                labels: vectors.len(),
                items: items.len(),
            }
            .into());
        }

        let corpus: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        let index = KeywordIndex::new(&corpus);
        let mut matched = vec![false; overrides.len()];
        let mut candidates = Vec::new();

        for (cluster_index, members) in assignment.groups().into_iter().enumerate() {
            if members.is_empty() {
                continue;
            }
            let centroid = centroids
                .and_then(|c| c.get(cluster_index))
                .map(Vec::as_slice);
            let view = ClusterView {
                cluster_index,
                texts: members.iter().map(|&m| items[m].text.as_str()).collect(),
                vectors: if has_vectors {
                    members.iter().map(|&m| vectors[m].as_slice()).collect()
                } else {
                    Vec::new()
                },
                centroid: if has_vectors { centroid } else { None },
            };

            let theme = self.theme_of(&view);
            let examples = self.examples_of(&view);
            let keywords = index.keywords(&view.texts, self.config.max_keywords);

            let mut rice = PartialRice::new()
                .with_reach(members.len() as i64)
                .with_confidence(self.default_confidence);
            for entry in overrides.apply(cluster_index, &theme, &mut rice) {
                matched[entry] = true;
            }

            debug!(
                cluster = cluster_index,
                members = members.len(),
                theme = %theme,
                namer = self.namer.name(),
                "candidate aggregated"
            );

            candidates.push(FeatureCandidate {
                cluster_index,
                theme,
                member_ids: members.iter().map(|&m| items[m].id.clone()).collect(),
                feedback_count: members.len(),
                examples,
                keywords,
                rice,
            });
        }

        Ok(Aggregation {
            candidates,
            matched_overrides: matched,
        })
    }

    fn theme_of(&self, view: &ClusterView<'_>) -> String {
        let raw = self.namer.synthesize(view);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            format!("Cluster {}", view.cluster_index)
        } else {
            truncate_chars(trimmed, self.config.max_theme_chars)
        }
    }

    /// Nearest members first; input order breaks ties and is used as is
    /// when there is no centroid. Never more than three, whatever the
    /// config says.
    fn examples_of(&self, view: &ClusterView<'_>) -> Vec<String> {
        let mut order: Vec<(usize, f64)> = (0..view.texts.len()).map(|i| (i, 0.0)).collect();
        if let Some(centroid) = view.centroid {
            for (i, d) in order.iter_mut() {
                *d = distance(self.config.distance, view.vectors[*i], centroid);
            }
            order.sort_by(|a, b| a.1.total_cmp(&b.1));
        }
        order
            .into_iter()
            .take(self.config.max_examples.min(MAX_EXAMPLES_LIMIT))
            .map(|(i, _)| view.texts[i].trim().to_string())
            .collect()
    }
}
