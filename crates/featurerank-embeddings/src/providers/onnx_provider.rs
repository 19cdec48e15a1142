//! ONNX Runtime embedding provider.
//!
//! Sentence-embedding models exported to ONNX (e.g. all-MiniLM-L6-v2,
//! 384 dims) via the `ort` crate, tokenized with the model's own
//! `tokenizer.json`. Session and tokenizer are loaded together on first use
//! and kept for the lifetime of the provider; a failure in either marks the
//! provider unavailable so the fallback chain moves on.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use featurerank_core::errors::{EmbeddingError, FeatureRankResult};
use featurerank_core::models::EmbeddingVector;
use featurerank_core::traits::IEmbeddingProvider;
use ort::session::Session;
use ort::value::Tensor;
use tracing::{debug, info};

use super::l2_normalize;
use super::tokenizer::{EncodedText, ModelTokenizer};

/// Session plus the tokenizer that produces its input ids.
struct LoadedModel {
    session: Mutex<Session>,
    tokenizer: ModelTokenizer,
}

/// ONNX-backed provider with lazy model loading.
pub struct OnnxProvider {
    model_path: String,
    tokenizer_path: String,
    model_name: String,
    dimensions: usize,
    /// `Err` holds the load failure so it is reported, not retried.
    loaded: OnceLock<Result<LoadedModel, String>>,
}

impl OnnxProvider {
    /// Describe a model without loading it.
    ///
    /// `tokenizer_path` defaults to `tokenizer.json` next to the model file.
    pub fn new(model_path: &str, tokenizer_path: Option<&str>, dimensions: usize) -> Self {
        let model_name = Path::new(model_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx-model")
            .to_string();
        let tokenizer_path = tokenizer_path
            .map(str::to_string)
            .unwrap_or_else(|| sibling_tokenizer(model_path).to_string_lossy().into_owned());

        Self {
            model_path: model_path.to_string(),
            tokenizer_path,
            model_name,
            dimensions,
            loaded: OnceLock::new(),
        }
    }

    /// Create the provider and load the model and tokenizer immediately.
    ///
    /// # Errors
    /// Returns `EmbeddingError::ModelLoadFailed` if either cannot be loaded.
    pub fn load(
        model_path: &str,
        tokenizer_path: Option<&str>,
        dimensions: usize,
    ) -> FeatureRankResult<Self> {
        let provider = Self::new(model_path, tokenizer_path, dimensions);
        provider.loaded()?;
        Ok(provider)
    }

    pub fn tokenizer_path(&self) -> &str {
        &self.tokenizer_path
    }

    fn loaded(&self) -> FeatureRankResult<&LoadedModel> {
        self.loaded
            .get_or_init(|| self.open())
            .as_ref()
            .map_err(|reason| {
                EmbeddingError::ModelLoadFailed {
                    path: self.model_path.clone(),
                    reason: reason.clone(),
                }
                .into()
            })
    }

    fn open(&self) -> Result<LoadedModel, String> {
        if !Path::new(&self.model_path).exists() {
            return Err("model file not found".to_string());
        }
        let tokenizer = ModelTokenizer::from_file(&self.tokenizer_path)?;
        let session = Session::builder()
            .map_err(|e| e.to_string())?
            .with_intra_threads(2)
            .map_err(|e| e.to_string())?
            .commit_from_file(&self.model_path)
            .map_err(|e| e.to_string())?;
        info!(
            model = %self.model_path,
            tokenizer = %self.tokenizer_path,
            "ONNX model loaded"
        );
        Ok(LoadedModel {
            session: Mutex::new(session),
            tokenizer,
        })
    }

    fn infer(&self, text: &str) -> FeatureRankResult<EmbeddingVector> {
        let loaded = self.loaded()?;
        let encoded = loaded.tokenizer.encode(text)?;
        let seq_len = encoded.len();
        let EncodedText {
            input_ids,
            attention_mask,
            token_type_ids,
        } = encoded;

        let tensor = |values: Vec<i64>| {
            Tensor::from_array((vec![1i64, seq_len as i64], values)).map_err(|e| {
                EmbeddingError::InferenceFailed {
                    reason: format!("tensor creation error: {e}"),
                }
            })
        };
        let ids_tensor = tensor(input_ids)?;
        let mask_tensor = tensor(attention_mask)?;
        let type_tensor = tensor(token_type_ids)?;

        let mut session = loaded
            .session
            .lock()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("session lock poisoned: {e}"),
            })?;

        // BERT-family exports take ids, mask and segment ids in this order.
        let outputs = session
            .run(ort::inputs![ids_tensor, mask_tensor, type_tensor])
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let (_name, output) = outputs
            .iter()
            .next()
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: "no output tensor".to_string(),
            })?;

        let (shape, data) =
            output
                .try_extract_tensor::<f32>()
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("tensor extraction failed: {e}"),
                })?;

        let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        let mut embedding = mean_pool(&dims, data)?;
        l2_normalize(&mut embedding);

        if embedding.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            }
            .into());
        }
        debug!(model = %self.model_name, tokens = seq_len, "ONNX inference done");
        Ok(embedding)
    }
}

fn sibling_tokenizer(model_path: &str) -> PathBuf {
    Path::new(model_path)
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join("tokenizer.json")
}

/// Mean-pool a `[1, seq, dims]` hidden state, or pass through a pooled
/// `[1, dims]` output.
fn mean_pool(shape: &[usize], data: &[f32]) -> FeatureRankResult<EmbeddingVector> {
    match *shape {
        [1, seq, dims] if seq > 0 && data.len() >= seq * dims => {
            let mut pooled = vec![0.0f32; dims];
            for row in data[..seq * dims].chunks_exact(dims) {
                for (acc, v) in pooled.iter_mut().zip(row) {
                    *acc += v;
                }
            }
            for v in &mut pooled {
                *v /= seq as f32;
            }
            Ok(pooled)
        }
        [1, dims] if data.len() >= dims => Ok(data[..dims].to_vec()),
        _ => Err(EmbeddingError::InferenceFailed {
            reason: format!("unexpected output shape: {shape:?}"),
        }
        .into()),
    }
}

impl IEmbeddingProvider for OnnxProvider {
    fn embed(&self, text: &str) -> FeatureRankResult<EmbeddingVector> {
        self.infer(text)
    }

    fn embed_batch(&self, texts: &[String]) -> FeatureRankResult<Vec<EmbeddingVector>> {
        texts.iter().map(|t| self.infer(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model_name
    }

    fn is_available(&self) -> bool {
        match self.loaded.get() {
            Some(loaded) => loaded.is_ok(),
            None => Path::new(&self.model_path).exists() && Path::new(&self.tokenizer_path).exists(),
        }
    }
}
