//! Embedding providers and provider selection.

mod hashed_tfidf;
mod onnx_provider;
mod tokenizer;

pub use hashed_tfidf::HashedTfIdf;
pub use onnx_provider::OnnxProvider;
pub use tokenizer::{EncodedText, ModelTokenizer, MAX_SEQUENCE_LENGTH};

use featurerank_core::config::EmbeddingConfig;
use featurerank_core::traits::IEmbeddingProvider;
use tracing::warn;

/// Build the primary provider named by the config.
///
/// Unknown names and an `onnx` provider without a model path resolve to
/// the hashed TF-IDF provider. The ONNX model and its tokenizer are loaded
/// lazily on first use, so this never touches either file.
pub fn create_provider(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    match (config.provider.as_str(), config.model_path.as_deref()) {
        ("onnx", Some(path)) => Box::new(OnnxProvider::new(
            path,
            config.tokenizer_path.as_deref(),
            config.dimensions,
        )),
        ("onnx", None) => {
            warn!("onnx provider configured without model_path, using hashed TF-IDF");
            Box::new(HashedTfIdf::new(config.dimensions))
        }
        ("tfidf", _) => Box::new(HashedTfIdf::new(config.dimensions)),
        (other, _) => {
            warn!(provider = other, "unknown embedding provider, using hashed TF-IDF");
            Box::new(HashedTfIdf::new(config.dimensions))
        }
    }
}

/// Scale `v` to unit length in place. Zero vectors are left as-is.
pub(crate) fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tfidf_is_selected_by_name() {
        let provider = create_provider(&EmbeddingConfig::default());
        assert_eq!(provider.name(), HashedTfIdf::NAME);
        assert_eq!(provider.dimensions(), 384);
    }

    #[test]
    fn onnx_without_path_falls_back() {
        let config = EmbeddingConfig {
            provider: "onnx".to_string(),
            ..Default::default()
        };
        assert_eq!(create_provider(&config).name(), HashedTfIdf::NAME);
    }

    #[test]
    fn onnx_with_path_is_deferred() {
        let config = EmbeddingConfig {
            provider: "onnx".to_string(),
            model_path: Some("/nonexistent/model.onnx".to_string()),
            ..Default::default()
        };
        let provider = create_provider(&config);
        assert_eq!(provider.name(), "model");
        assert!(!provider.is_available());
    }

    #[test]
    fn unknown_provider_falls_back() {
        let config = EmbeddingConfig {
            provider: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        assert_eq!(create_provider(&config).name(), HashedTfIdf::NAME);
    }

    #[test]
    fn normalize_produces_unit_length() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);

        let mut zero = vec![0.0; 3];
        l2_normalize(&mut zero);
        assert_eq!(zero, vec![0.0; 3]);
    }
}
