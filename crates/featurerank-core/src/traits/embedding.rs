use crate::errors::FeatureRankResult;
use crate::models::EmbeddingVector;

/// Embedding generation provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> FeatureRankResult<EmbeddingVector>;

    /// Embed a batch of texts. Output order matches input order.
    fn embed_batch(&self, texts: &[String]) -> FeatureRankResult<Vec<EmbeddingVector>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;

    /// Identifies the model version; equal ids must produce equal vectors.
    fn model_id(&self) -> String {
        format!("{}:{}", self.name(), self.dimensions())
    }
}
