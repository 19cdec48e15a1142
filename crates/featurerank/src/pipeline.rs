//! The two operations the core exposes: `cluster_and_score` and
//! `embed_only`.

use std::collections::HashSet;
use std::sync::Arc;

use featurerank_clustering::{ClusterEngine, FeatureAggregator};
use featurerank_core::config::FeatureRankConfig;
use featurerank_core::errors::{EmbeddingError, FeatureRankError, FeatureRankResult};
use featurerank_core::models::{
    EmbeddingVector, FeedbackItem, OverrideKey, PrioritizationReport, RiceOverrides, RunSummary,
};
use featurerank_core::text::{is_blank, preprocess};
use featurerank_core::traits::{IEmbeddingProvider, IThemeNamer};
use featurerank_embeddings::shared_engine;
use featurerank_scoring::{rank, RiceScorer};
use tracing::{debug, info, warn};

/// Batch pipeline from feedback items to ranked feature candidates.
///
/// Holds no per-run state: concurrent runs over different snapshots share
/// one pipeline safely.
pub struct FeaturePipeline {
    config: FeatureRankConfig,
    provider: Arc<dyn IEmbeddingProvider>,
    engine: ClusterEngine,
    aggregator: FeatureAggregator,
    scorer: RiceScorer,
}

impl FeaturePipeline {
    /// Build a pipeline around any embedding provider.
    pub fn new(
        config: FeatureRankConfig,
        provider: Arc<dyn IEmbeddingProvider>,
    ) -> FeatureRankResult<Self> {
        config.validate()?;
        info!(
            provider = provider.name(),
            dimensions = provider.dimensions(),
            k = config.clustering.k,
            theme_strategy = ?config.clustering.theme_strategy,
            "feature pipeline initialized"
        );
        Ok(Self {
            engine: ClusterEngine::new(config.clustering.clone()),
            aggregator: FeatureAggregator::new(
                &config.clustering,
                config.scoring.default_confidence,
            ),
            scorer: RiceScorer::new(config.scoring.clone()),
            provider,
            config,
        })
    }

    /// Build a pipeline on the process-wide embedding engine.
    pub fn shared(config: FeatureRankConfig) -> FeatureRankResult<Self> {
        let engine: Arc<dyn IEmbeddingProvider> = shared_engine(&config.embedding);
        Self::new(config, engine)
    }

    /// Replace the configured theme namer.
    pub fn with_theme_namer(mut self, namer: Box<dyn IThemeNamer>) -> Self {
        self.aggregator = self.aggregator.with_namer(namer);
        self
    }

    pub fn config(&self) -> &FeatureRankConfig {
        &self.config
    }

    pub fn provider(&self) -> &dyn IEmbeddingProvider {
        self.provider.as_ref()
    }

    /// Cluster the feedback, score each cluster, and return the top-N.
    ///
    /// `k` and `top_n` default to the configured values. Candidates missing
    /// RICE inputs are reported in `skipped`; an out-of-range override
    /// aborts the run.
    pub fn cluster_and_score(
        &self,
        items: Vec<FeedbackItem>,
        k: Option<usize>,
        overrides: &RiceOverrides,
        top_n: Option<usize>,
    ) -> FeatureRankResult<PrioritizationReport> {
        let span = crate::pipeline_span!(items.len(), k);
        let _guard = span.enter();
        info!(items = items.len(), overrides = overrides.len(), "run started");

        validate_items(&items)?;
        let ready = featurerank_clustering::readiness(items.len(), &self.config.clustering);
        if !ready.can_cluster {
            return Err(FeatureRankError::InsufficientData {
                available: ready.feedback_count,
                required: ready.min_required,
            });
        }

        let texts: Vec<String> = items.iter().map(|i| i.text.clone()).collect();
        let vectors = self.embed(&texts)?;

        let requested_k = k.unwrap_or(self.config.clustering.k);
        let (partition, assignment) = {
            let _span = crate::clustering_span!(vectors.len(), requested_k).entered();
            let partition = self.engine.partition(&vectors, Some(requested_k))?;
            let assignment =
                partition.to_assignment(items.iter().map(|i| i.id.clone()).collect())?;
            (partition, assignment)
        };

        let aggregation = self.aggregator.aggregate(
            &items,
            &assignment,
            &vectors,
            Some(&partition.centroids),
            overrides,
        )?;
        let unmatched_overrides: Vec<OverrideKey> = aggregation
            .unmatched_overrides()
            .into_iter()
            .map(|i| overrides.entries[i].0.clone())
            .collect();
        for key in &unmatched_overrides {
            warn!(target_cluster = %key, "RICE override matched no cluster");
        }

        let total_candidates = aggregation.candidates.len();
        let outcome = {
            let _span = crate::scoring_span!(total_candidates).entered();
            self.scorer.score_all(aggregation.candidates)?
        };
        let scored = outcome.scored.len();
        let ranked = rank(outcome.scored, top_n.unwrap_or(self.config.scoring.top_n));

        let summary = RunSummary {
            feedback_count: items.len(),
            requested_k,
            effective_k: partition.k,
            total_candidates,
            scored,
            skipped: outcome.skipped.len(),
            unmatched_overrides,
        };
        info!(
            effective_k = summary.effective_k,
            candidates = summary.total_candidates,
            scored = summary.scored,
            skipped = summary.skipped,
            returned = ranked.len(),
            "run complete"
        );

        Ok(PrioritizationReport {
            ranked,
            skipped: outcome.skipped,
            assignment,
            summary,
        })
    }

    /// Embed texts without clustering. One vector per text, same order.
    pub fn embed_only(&self, texts: &[String]) -> FeatureRankResult<Vec<EmbeddingVector>> {
        for (i, text) in texts.iter().enumerate() {
            if is_blank(text) {
                return Err(FeatureRankError::InvalidInput {
                    item: format!("text #{i}"),
                    reason: "text is empty or whitespace-only".to_string(),
                });
            }
        }
        self.embed(texts)
    }

    fn embed(&self, texts: &[String]) -> FeatureRankResult<Vec<EmbeddingVector>> {
        let _span =
            crate::embedding_span!(self.provider.name(), self.provider.dimensions()).entered();
        let prepared: Vec<String> = texts.iter().map(|t| preprocess(t)).collect();
        let vectors = self.provider.embed_batch(&prepared)?;
        if vectors.len() != texts.len() {
            return Err(EmbeddingError::CardinalityMismatch {
                inputs: texts.len(),
                outputs: vectors.len(),
            }
            .into());
        }
        let expected = self.provider.dimensions();
        if let Some(bad) = vectors.iter().find(|v| v.len() != expected) {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: bad.len(),
            }
            .into());
        }
        debug!(texts = texts.len(), dimensions = expected, "texts embedded");
        Ok(vectors)
    }
}

/// Reject empty texts, empty ids and duplicate ids, naming the item.
fn validate_items(items: &[FeedbackItem]) -> FeatureRankResult<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        if item.id.trim().is_empty() {
            return Err(FeatureRankError::InvalidInput {
                item: format!("item #{i}"),
                reason: "id is empty".to_string(),
            });
        }
        if is_blank(&item.text) {
            return Err(FeatureRankError::InvalidInput {
                item: item.id.clone(),
                reason: "text is empty or whitespace-only".to_string(),
            });
        }
        if !seen.insert(item.id.as_str()) {
            return Err(FeatureRankError::InvalidInput {
                item: item.id.clone(),
                reason: "duplicate feedback id".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use featurerank_core::errors::ErrorKind;
    use test_fixtures::{make_items, StubEmbedder};

    fn pipeline() -> FeaturePipeline {
        FeaturePipeline::new(FeatureRankConfig::default(), Arc::new(StubEmbedder::default()))
            .unwrap()
    }

    #[test]
    fn duplicate_ids_rejected_before_embedding() {
        let mut items = make_items(&["dark mode", "csv export"]);
        items[1].id = items[0].id.clone();
        let err = pipeline()
            .cluster_and_score(items, None, &RiceOverrides::new(), None)
            .unwrap_err();
        match err {
            FeatureRankError::InvalidInput { item, reason } => {
                assert_eq!(item, "fb-0");
                assert!(reason.contains("duplicate"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_text_names_item() {
        let items = make_items(&["dark mode", "   "]);
        let err = pipeline()
            .cluster_and_score(items, None, &RiceOverrides::new(), None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("fb-1"));
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = FeatureRankConfig::default();
        config.clustering.k = 0;
        let result = FeaturePipeline::new(config, Arc::new(StubEmbedder::default()));
        assert!(matches!(result, Err(FeatureRankError::ConfigError(_))));
    }
}
