//! L1 embedding cache.
//!
//! Entries are scoped by the model that produced them: a key pairs the
//! model id with a blake3 digest of the preprocessed text, so vectors from
//! different providers never mix and a replaced provider's vectors can be
//! dropped in one call.

use std::sync::Arc;
use std::time::Duration;

use featurerank_core::models::EmbeddingVector;
use moka::sync::Cache;

/// Idle entries are evicted after an hour.
const IDLE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    model: Arc<str>,
    text: blake3::Hash,
}

impl CacheKey {
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Cache key for a preprocessed text embedded by the given model.
pub fn cache_key(model_id: &str, text: &str) -> CacheKey {
    CacheKey {
        model: Arc::from(model_id),
        text: blake3::hash(text.as_bytes()),
    }
}

/// In-process embedding cache on moka (TinyLFU admission, entry bound,
/// idle TTL).
pub struct L1MemoryCache {
    cache: Cache<CacheKey, EmbeddingVector>,
}

impl L1MemoryCache {
    pub fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(max_entries)
                .time_to_idle(IDLE_TTL)
                .build(),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<EmbeddingVector> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: CacheKey, embedding: EmbeddingVector) {
        self.cache.insert(key, embedding);
    }

    /// Drop every vector produced by `model_id`. Returns how many went.
    pub fn invalidate_model(&self, model_id: &str) -> usize {
        let stale: Vec<Arc<CacheKey>> = self
            .cache
            .iter()
            .filter(|(key, _)| key.model() == model_id)
            .map(|(key, _)| key)
            .collect();
        for key in &stale {
            self.cache.invalidate(key.as_ref());
        }
        stale.len()
    }

    /// Entries currently held for `model_id`.
    pub fn model_len(&self, model_id: &str) -> usize {
        self.cache
            .iter()
            .filter(|(key, _)| key.model() == model_id)
            .count()
    }

    /// Approximate entry count; moka applies writes lazily.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
