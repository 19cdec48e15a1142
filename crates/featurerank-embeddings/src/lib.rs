//! # featurerank-embeddings
//!
//! Maps feedback text to fixed-size vectors.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingEngine
//! ├── preprocessing (lowercase, whitespace collapse)
//! ├── L1MemoryCache (moka, keyed by model id + blake3(text), evictable per model)
//! └── DegradationChain (provider fallback, one provider per batch)
//!     ├── OnnxProvider (local model + tokenizer.json, loaded on first use)
//!     └── HashedTfIdf (always available)
//! ```
//!
//! [`shared::shared_engine`] is the single process-wide acquisition point.

pub mod cache;
pub mod degradation;
pub mod engine;
pub mod providers;
pub mod shared;

pub use cache::L1MemoryCache;
pub use degradation::DegradationChain;
pub use engine::EmbeddingEngine;
pub use providers::{HashedTfIdf, ModelTokenizer, OnnxProvider};
pub use shared::{install_shared_engine, shared_engine};
