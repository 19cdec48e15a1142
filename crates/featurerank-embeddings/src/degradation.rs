//! Provider fallback chain.
//!
//! Providers are tried in priority order. A batch is always served by a
//! single provider: if any text in it fails, the whole batch moves to the
//! next provider, so one run never mixes vector spaces.

use std::sync::Mutex;

use chrono::Utc;
use featurerank_core::errors::{EmbeddingError, FeatureRankResult};
use featurerank_core::models::{DegradationEvent, EmbeddingVector};
use featurerank_core::traits::IEmbeddingProvider;
use rayon::prelude::*;
use tracing::warn;

/// Chunking options for one chain call.
#[derive(Debug, Clone, Copy)]
pub struct BatchPlan {
    pub batch_size: usize,
    pub parallel: bool,
}

/// Ordered list of providers with degradation tracking.
pub struct DegradationChain {
    chain: Vec<Box<dyn IEmbeddingProvider>>,
    events: Mutex<Vec<DegradationEvent>>,
}

impl Default for DegradationChain {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationChain {
    pub fn new() -> Self {
        Self {
            chain: Vec::new(),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.chain.push(provider);
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// First available provider, if any.
    pub fn active(&self) -> Option<&dyn IEmbeddingProvider> {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.as_ref())
    }

    pub fn active_provider_name(&self) -> &str {
        self.active().map(|p| p.name()).unwrap_or("none")
    }

    /// Embed `texts` with the first provider that handles all of them.
    ///
    /// Returns the vectors and the model id of the provider that served them.
    pub fn embed_all(
        &self,
        texts: &[String],
        plan: BatchPlan,
    ) -> FeatureRankResult<(Vec<EmbeddingVector>, String)> {
        let mut last_error = None;
        let primary = self.chain.first().map(|p| p.name().to_string());

        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }
            match run_batches(provider.as_ref(), texts, plan) {
                Ok(vectors) => {
                    if i > 0 {
                        self.record(DegradationEvent {
                            component: "embeddings".to_string(),
                            failure: format!(
                                "{} unavailable",
                                primary.as_deref().unwrap_or("unknown")
                            ),
                            fallback_used: provider.name().to_string(),
                            timestamp: Utc::now(),
                        });
                    }
                    return Ok((vectors, provider.model_id()));
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "provider failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: format!("all {} providers exhausted", self.chain.len()),
            }
            .into()
        }))
    }

    /// Take the accumulated degradation events.
    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        let mut events = self.events.lock().unwrap_or_else(|p| p.into_inner());
        std::mem::take(&mut *events)
    }

    fn record(&self, event: DegradationEvent) {
        self.events
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(event);
    }
}

/// Embed every text with one provider, chunked per `plan`, checking
/// cardinality and dimensions. Chunk results are concatenated in order.
fn run_batches(
    provider: &dyn IEmbeddingProvider,
    texts: &[String],
    plan: BatchPlan,
) -> FeatureRankResult<Vec<EmbeddingVector>> {
    let batch_size = plan.batch_size.max(1);
    let embed_chunk = |chunk: &[String]| -> FeatureRankResult<Vec<EmbeddingVector>> {
        let vectors = provider.embed_batch(chunk)?;
        if vectors.len() != chunk.len() {
            return Err(EmbeddingError::CardinalityMismatch {
                inputs: chunk.len(),
                outputs: vectors.len(),
            }
            .into());
        }
        if let Some(bad) = vectors.iter().find(|v| v.len() != provider.dimensions()) {
            return Err(EmbeddingError::DimensionMismatch {
                expected: provider.dimensions(),
                actual: bad.len(),
            }
            .into());
        }
        Ok(vectors)
    };

    let chunks: Vec<Vec<EmbeddingVector>> = if plan.parallel {
        texts
            .par_chunks(batch_size)
            .map(embed_chunk)
            .collect::<FeatureRankResult<_>>()?
    } else {
        texts
            .chunks(batch_size)
            .map(embed_chunk)
            .collect::<FeatureRankResult<_>>()?
    };
    Ok(chunks.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::HashedTfIdf;

    struct Broken;

    impl IEmbeddingProvider for Broken {
        fn embed(&self, _text: &str) -> FeatureRankResult<EmbeddingVector> {
            Err(EmbeddingError::InferenceFailed {
                reason: "boom".to_string(),
            }
            .into())
        }
        fn embed_batch(&self, _texts: &[String]) -> FeatureRankResult<Vec<EmbeddingVector>> {
            Err(EmbeddingError::InferenceFailed {
                reason: "boom".to_string(),
            }
            .into())
        }
        fn dimensions(&self) -> usize {
            16
        }
        fn name(&self) -> &str {
            "broken"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    struct WrongDims;

    impl IEmbeddingProvider for WrongDims {
        fn embed(&self, _text: &str) -> FeatureRankResult<EmbeddingVector> {
            Ok(vec![0.0; 3])
        }
        fn embed_batch(&self, texts: &[String]) -> FeatureRankResult<Vec<EmbeddingVector>> {
            Ok(texts.iter().map(|_| vec![0.0; 3]).collect())
        }
        fn dimensions(&self) -> usize {
            16
        }
        fn name(&self) -> &str {
            "wrong-dims"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    const PLAN: BatchPlan = BatchPlan {
        batch_size: 2,
        parallel: true,
    };

    fn texts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("feedback number {i}")).collect()
    }

    #[test]
    fn primary_success_records_no_event() {
        let mut chain = DegradationChain::new();
        chain.push(Box::new(HashedTfIdf::new(16)));
        let (vectors, model) = chain.embed_all(&texts(5), PLAN).unwrap();
        assert_eq!(vectors.len(), 5);
        assert_eq!(model, "hashed-tfidf:16");
        assert!(chain.drain_events().is_empty());
    }

    #[test]
    fn failure_falls_back_and_records_event() {
        let mut chain = DegradationChain::new();
        chain.push(Box::new(Broken));
        chain.push(Box::new(HashedTfIdf::new(16)));
        let (vectors, model) = chain.embed_all(&texts(3), PLAN).unwrap();
        assert_eq!(vectors.len(), 3);
        assert_eq!(model, "hashed-tfidf:16");

        let events = chain.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].fallback_used, "hashed-tfidf");
        assert!(events[0].failure.contains("broken"));
        assert!(chain.drain_events().is_empty());
    }

    #[test]
    fn wrong_dimensions_count_as_failure() {
        let mut chain = DegradationChain::new();
        chain.push(Box::new(WrongDims));
        chain.push(Box::new(HashedTfIdf::new(16)));
        let (vectors, _) = chain.embed_all(&texts(2), PLAN).unwrap();
        assert!(vectors.iter().all(|v| v.len() == 16));
    }

    #[test]
    fn exhausted_chain_returns_last_error() {
        let mut chain = DegradationChain::new();
        chain.push(Box::new(Broken));
        let err = chain.embed_all(&texts(1), PLAN).unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn empty_chain_is_unavailable() {
        let chain = DegradationChain::new();
        let err = chain.embed_all(&texts(1), PLAN).unwrap_err();
        assert!(err.to_string().contains("provider unavailable"));
        assert_eq!(chain.active_provider_name(), "none");
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let mut chain = DegradationChain::new();
        chain.push(Box::new(HashedTfIdf::new(32)));
        let input = texts(17);
        let (par, _) = chain.embed_all(&input, PLAN).unwrap();
        let (seq, _) = chain
            .embed_all(
                &input,
                BatchPlan {
                    batch_size: 4,
                    parallel: false,
                },
            )
            .unwrap();
        assert_eq!(par, seq);
    }
}
