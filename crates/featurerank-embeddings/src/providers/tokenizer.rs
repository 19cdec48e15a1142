//! Model tokenizer backed by a HuggingFace `tokenizer.json`.

use std::path::Path;

use featurerank_core::errors::{EmbeddingError, FeatureRankResult};
use tokenizers::{Tokenizer, TruncationParams};

/// Longest token sequence handed to the model, special tokens included.
pub const MAX_SEQUENCE_LENGTH: usize = 256;

/// Token ids and masks for one text, widened to the model's `i64` inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    pub input_ids: Vec<i64>,
    pub attention_mask: Vec<i64>,
    pub token_type_ids: Vec<i64>,
}

impl EncodedText {
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }
}

/// Tokenizer shipped alongside an exported sentence-embedding model.
pub struct ModelTokenizer {
    inner: Tokenizer,
}

impl ModelTokenizer {
    /// Load `tokenizer.json`, truncating encodings to [`MAX_SEQUENCE_LENGTH`].
    ///
    /// # Errors
    /// Returns the reason the file could not be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(format!("tokenizer file not found: {}", path.display()));
        }
        let mut inner = Tokenizer::from_file(path).map_err(|e| e.to_string())?;
        inner
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| e.to_string())?;
        Ok(Self { inner })
    }

    /// Encode `text` with the model's special tokens added.
    pub fn encode(&self, text: &str) -> FeatureRankResult<EncodedText> {
        let encoding =
            self.inner
                .encode(text, true)
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("tokenization failed: {e}"),
                })?;
        let widen = |xs: &[u32]| xs.iter().map(|&x| i64::from(x)).collect::<Vec<_>>();
        Ok(EncodedText {
            input_ids: widen(encoding.get_ids()),
            attention_mask: widen(encoding.get_attention_mask()),
            token_type_ids: widen(encoding.get_type_ids()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subset() -> ModelTokenizer {
        ModelTokenizer::from_file(test_fixtures::fixture_path("tokenizers/wordpiece-subset.json"))
            .unwrap()
    }

    #[test]
    fn produces_wordpiece_ids() {
        let encoded = subset().encode("the dark mode").unwrap();
        assert_eq!(encoded.input_ids, vec![101, 1996, 2601, 5549, 102]);
        assert_eq!(encoded.attention_mask, vec![1; 5]);
        assert_eq!(encoded.token_type_ids, vec![0; 5]);
    }

    #[test]
    fn lowercases_and_splits_subwords() {
        let encoded = subset().encode("The Dark modes.").unwrap();
        assert_eq!(encoded.input_ids, vec![101, 1996, 2601, 5549, 2015, 1012, 102]);
    }

    #[test]
    fn unknown_words_map_to_unk() {
        let encoded = subset().encode("the zebra").unwrap();
        assert_eq!(encoded.input_ids, vec![101, 1996, 100, 102]);
    }

    #[test]
    fn long_input_is_truncated() {
        let text = vec!["the"; MAX_SEQUENCE_LENGTH * 2].join(" ");
        let encoded = subset().encode(&text).unwrap();
        assert_eq!(encoded.len(), MAX_SEQUENCE_LENGTH);
        assert_eq!(encoded.input_ids.first(), Some(&101));
        assert_eq!(encoded.input_ids.last(), Some(&102));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ModelTokenizer::from_file("/nonexistent/tokenizer.json").err().unwrap();
        assert!(err.contains("tokenizer file not found"));
    }
}
