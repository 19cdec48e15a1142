//! EmbeddingEngine: the main entry point for featurerank-embeddings.
//!
//! Validates and preprocesses texts, serves repeats from the L1 cache and
//! embeds the rest through the provider fallback chain.

use featurerank_core::config::EmbeddingConfig;
use featurerank_core::errors::{FeatureRankError, FeatureRankResult};
use featurerank_core::models::{DegradationEvent, EmbeddingVector};
use featurerank_core::text;
use featurerank_core::traits::IEmbeddingProvider;
use tracing::{debug, info, warn};

use crate::cache::{cache_key, L1MemoryCache};
use crate::degradation::{BatchPlan, DegradationChain};
use crate::providers::{self, HashedTfIdf};

/// Deterministic text → vector mapping with caching and fallback.
pub struct EmbeddingEngine {
    chain: DegradationChain,
    cache: L1MemoryCache,
    config: EmbeddingConfig,
}

impl EmbeddingEngine {
    /// Create an engine from configuration.
    ///
    /// The configured provider is primary; hashed TF-IDF is appended as the
    /// last resort unless it already is the primary.
    pub fn new(config: EmbeddingConfig) -> Self {
        let mut chain = DegradationChain::new();
        let primary = providers::create_provider(&config);
        let primary_is_tfidf = primary.name() == HashedTfIdf::NAME;
        chain.push(primary);
        if !primary_is_tfidf {
            chain.push(Box::new(HashedTfIdf::new(config.dimensions)));
        }
        Self::from_chain(chain, config)
    }

    /// Create an engine around a single caller-supplied provider, with no
    /// fallback. Used to substitute deterministic stubs in tests.
    pub fn with_provider(provider: Box<dyn IEmbeddingProvider>, config: EmbeddingConfig) -> Self {
        let mut chain = DegradationChain::new();
        chain.push(provider);
        Self::from_chain(chain, config)
    }

    fn from_chain(chain: DegradationChain, config: EmbeddingConfig) -> Self {
        let cache = L1MemoryCache::new(config.l1_cache_size);
        info!(
            provider = chain.active_provider_name(),
            dims = config.dimensions,
            "EmbeddingEngine initialized"
        );
        Self {
            chain,
            cache,
            config,
        }
    }

    /// Embed texts in order. Blank texts fail with `InvalidInput`.
    pub fn embed_texts(&self, texts: &[String]) -> FeatureRankResult<Vec<EmbeddingVector>> {
        for (i, raw) in texts.iter().enumerate() {
            if text::is_blank(raw) {
                return Err(FeatureRankError::InvalidInput {
                    item: format!("text #{i}"),
                    reason: "text is empty or whitespace-only".to_string(),
                });
            }
        }
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let cleaned: Vec<String> = texts.iter().map(|t| text::preprocess(t)).collect();
        let expected_model = self.expected_model_id();

        let mut slots: Vec<Option<EmbeddingVector>> = cleaned
            .iter()
            .map(|t| {
                expected_model
                    .as_deref()
                    .and_then(|model| self.cache.get(&cache_key(model, t)))
            })
            .collect();

        let misses: Vec<usize> = (0..slots.len()).filter(|&i| slots[i].is_none()).collect();
        debug!(
            total = cleaned.len(),
            cache_hits = cleaned.len() - misses.len(),
            "embedding batch"
        );
        if misses.is_empty() {
            return Ok(slots.into_iter().flatten().collect());
        }

        let miss_texts: Vec<String> = misses.iter().map(|&i| cleaned[i].clone()).collect();
        let (vectors, served_by) = self.chain.embed_all(&miss_texts, self.plan())?;

        if let Some(stale) = expected_model.as_deref().filter(|m| *m != served_by) {
            let evicted = self.cache.invalidate_model(stale);
            debug!(model = stale, evicted, "dropped cached vectors of failed provider");
        }

        if expected_model.as_deref() != Some(served_by.as_str()) && misses.len() < cleaned.len() {
            // Cached hits came from a different model; re-embed everything
            // with the provider that is actually serving.
            warn!(
                expected = ?expected_model,
                served_by = %served_by,
                "embedding provider changed mid-run, re-embedding batch"
            );
            let (all, served_by) = self.chain.embed_all(&cleaned, self.plan())?;
            self.store(&served_by, &cleaned, &all);
            return Ok(all);
        }

        for (&slot, vector) in misses.iter().zip(vectors) {
            self.cache
                .insert(cache_key(&served_by, &cleaned[slot]), vector.clone());
            slots[slot] = Some(vector);
        }
        Ok(slots.into_iter().flatten().collect())
    }

    /// Take the degradation events accumulated so far.
    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.chain.drain_events()
    }

    pub fn active_provider(&self) -> &str {
        self.chain.active_provider_name()
    }

    pub fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    /// Number of cached vectors.
    pub fn cached_entries(&self) -> u64 {
        self.cache.len()
    }

    /// Number of cached vectors produced by `model_id`.
    pub fn cached_entries_for(&self, model_id: &str) -> usize {
        self.cache.model_len(model_id)
    }

    fn expected_model_id(&self) -> Option<String> {
        self.chain.active().map(|p| p.model_id())
    }

    fn plan(&self) -> BatchPlan {
        BatchPlan {
            batch_size: self.config.batch_size,
            parallel: self.config.parallel,
        }
    }

    fn store(&self, model: &str, texts: &[String], vectors: &[EmbeddingVector]) {
        for (t, v) in texts.iter().zip(vectors) {
            self.cache.insert(cache_key(model, t), v.clone());
        }
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> FeatureRankResult<EmbeddingVector> {
        let mut vectors = self.embed_texts(&[text.to_string()])?;
        Ok(vectors.remove(0))
    }

    fn embed_batch(&self, texts: &[String]) -> FeatureRankResult<Vec<EmbeddingVector>> {
        self.embed_texts(texts)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn name(&self) -> &str {
        "featurerank-embedding-engine"
    }

    fn is_available(&self) -> bool {
        self.chain.active().is_some()
    }

    fn model_id(&self) -> String {
        self.expected_model_id()
            .unwrap_or_else(|| format!("{}:{}", self.name(), self.dimensions()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(dims: usize) -> EmbeddingEngine {
        EmbeddingEngine::new(EmbeddingConfig {
            dimensions: dims,
            batch_size: 3,
            ..Default::default()
        })
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn returns_one_vector_per_text_in_order() {
        let e = engine(64);
        let texts = strings(&["dark mode", "csv export", "dark mode", "sso login"]);
        let vectors = e.embed_texts(&texts).unwrap();
        assert_eq!(vectors.len(), 4);
        assert!(vectors.iter().all(|v| v.len() == 64));
        assert_eq!(vectors[0], vectors[2]);
        assert_ne!(vectors[0], vectors[1]);
    }

    #[test]
    fn blank_text_is_invalid_input() {
        let e = engine(32);
        let err = e.embed_texts(&strings(&["ok text", "   "])).unwrap_err();
        assert_eq!(err.kind(), featurerank_core::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("#1"));
    }

    #[test]
    fn empty_batch_is_empty_output() {
        assert!(engine(32).embed_texts(&[]).unwrap().is_empty());
    }

    #[test]
    fn preprocessing_makes_case_and_spacing_irrelevant() {
        let e = engine(64);
        let v = e
            .embed_texts(&strings(&["Dark   Mode please", "dark mode PLEASE"]))
            .unwrap();
        assert_eq!(v[0], v[1]);
    }

    #[test]
    fn repeated_calls_hit_cache_and_match() {
        let e = engine(64);
        let texts = strings(&["bulk edit", "api rate limits"]);
        let first = e.embed_texts(&texts).unwrap();
        assert_eq!(e.cached_entries(), 2);
        let second = e.embed_texts(&texts).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn onnx_without_model_degrades_to_tfidf() {
        let e = EmbeddingEngine::new(EmbeddingConfig {
            provider: "onnx".to_string(),
            model_path: Some("/nonexistent/model.onnx".to_string()),
            dimensions: 32,
            ..Default::default()
        });
        assert_eq!(e.active_provider(), HashedTfIdf::NAME);
        let v = e.embed_texts(&strings(&["offline mode"])).unwrap();
        assert_eq!(v[0].len(), 32);
    }

    #[test]
    fn unreadable_tokenizer_degrades_to_tfidf() {
        // Both paths exist, so the provider looks available until the
        // tokenizer fails to parse on first use.
        let existing = test_fixtures::fixture_path("feedback/single_item.json");
        let existing = existing.to_string_lossy().into_owned();
        let e = EmbeddingEngine::new(EmbeddingConfig {
            provider: "onnx".to_string(),
            model_path: Some(existing.clone()),
            tokenizer_path: Some(existing),
            dimensions: 32,
            ..Default::default()
        });
        assert_eq!(e.active_provider(), "single_item");

        let v = e.embed_texts(&strings(&["offline mode"])).unwrap();
        assert_eq!(v[0].len(), 32);
        let events = e.drain_degradation_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].fallback_used, HashedTfIdf::NAME);
        assert_eq!(e.active_provider(), HashedTfIdf::NAME);
    }

    #[test]
    fn failed_provider_vectors_are_evicted() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        use featurerank_core::errors::EmbeddingError;

        struct Flaky(Arc<AtomicBool>);

        impl IEmbeddingProvider for Flaky {
            fn embed(&self, _text: &str) -> FeatureRankResult<EmbeddingVector> {
                if self.0.load(Ordering::SeqCst) {
                    return Err(EmbeddingError::InferenceFailed {
                        reason: "runtime crashed".to_string(),
                    }
                    .into());
                }
                Ok(vec![1.0; 16])
            }
            fn embed_batch(&self, texts: &[String]) -> FeatureRankResult<Vec<EmbeddingVector>> {
                texts.iter().map(|t| self.embed(t)).collect()
            }
            fn dimensions(&self) -> usize {
                16
            }
            fn name(&self) -> &str {
                "flaky"
            }
            fn is_available(&self) -> bool {
                true
            }
        }

        let failing = Arc::new(AtomicBool::new(false));
        let mut chain = DegradationChain::new();
        chain.push(Box::new(Flaky(Arc::clone(&failing))));
        chain.push(Box::new(HashedTfIdf::new(16)));
        let e = EmbeddingEngine::from_chain(
            chain,
            EmbeddingConfig {
                dimensions: 16,
                ..Default::default()
            },
        );

        e.embed_texts(&strings(&["dark mode", "csv export"])).unwrap();
        assert_eq!(e.cached_entries_for("flaky:16"), 2);

        failing.store(true, Ordering::SeqCst);
        e.embed_texts(&strings(&["offline sync"])).unwrap();
        assert_eq!(e.cached_entries_for("flaky:16"), 0);
        assert_eq!(e.cached_entries_for("hashed-tfidf:16"), 1);
    }

    #[test]
    fn trait_impl_matches_engine() {
        let e = engine(48);
        let provider: &dyn IEmbeddingProvider = &e;
        assert!(provider.is_available());
        assert_eq!(provider.model_id(), "hashed-tfidf:48");
        let single = provider.embed("calendar sync").unwrap();
        let batch = provider.embed_batch(&strings(&["calendar sync"])).unwrap();
        assert_eq!(single, batch[0]);
    }
}
