//! Hashed TF-IDF provider.
//!
//! Projects word unigrams and bigrams into a fixed number of buckets with
//! signed feature hashing. No model file, no network: always available and
//! bit-for-bit deterministic.

use std::collections::BTreeMap;

use featurerank_core::errors::FeatureRankResult;
use featurerank_core::models::EmbeddingVector;
use featurerank_core::traits::IEmbeddingProvider;

use super::l2_normalize;

/// Bigrams carry less weight than the words they are built from.
const BIGRAM_WEIGHT: f32 = 0.5;

/// Feature-hashing embedding provider.
pub struct HashedTfIdf {
    dimensions: usize,
}

impl HashedTfIdf {
    pub const NAME: &'static str = "hashed-tfidf";

    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// 64-bit FNV-1a.
    fn fnv1a(term: &str) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        h
    }

    /// Bucket index and sign for a term. The top bit picks the sign so that
    /// colliding terms cancel on average instead of piling up.
    fn bucket(&self, term: &str) -> (usize, f32) {
        let h = Self::fnv1a(term);
        let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
        ((h % self.dimensions as u64) as usize, sign)
    }

    fn words(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= 2)
            .map(str::to_lowercase)
            .filter(|w| !is_stop_word(w))
            .collect()
    }

    fn vectorize(&self, text: &str) -> EmbeddingVector {
        let mut vec = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return vec;
        }

        let words = Self::words(text);
        if words.is_empty() {
            return vec;
        }

        // BTreeMap keeps the accumulation order fixed, so colliding terms
        // always sum in the same order.
        let mut tf: BTreeMap<String, f32> = BTreeMap::new();
        for w in &words {
            *tf.entry(w.clone()).or_default() += 1.0;
        }
        for pair in words.windows(2) {
            *tf.entry(format!("{} {}", pair[0], pair[1])).or_default() += BIGRAM_WEIGHT;
        }

        let total = words.len() as f32;
        for (term, count) in &tf {
            // Longer terms are rarer; a cheap stand-in for corpus IDF.
            let idf = 1.0 + (term.len() as f32).ln();
            let (bucket, sign) = self.bucket(term);
            vec[bucket] += sign * (count / total) * idf;
        }

        l2_normalize(&mut vec);
        vec
    }
}

impl IEmbeddingProvider for HashedTfIdf {
    fn embed(&self, text: &str) -> FeatureRankResult<EmbeddingVector> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> FeatureRankResult<Vec<EmbeddingVector>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_available(&self) -> bool {
        true
    }
}

fn is_stop_word(word: &str) -> bool {
    matches!(
        word,
        "a" | "an"
            | "and"
            | "are"
            | "as"
            | "at"
            | "be"
            | "but"
            | "by"
            | "for"
            | "from"
            | "had"
            | "has"
            | "have"
            | "i"
            | "if"
            | "in"
            | "is"
            | "it"
            | "its"
            | "me"
            | "my"
            | "of"
            | "on"
            | "or"
            | "our"
            | "so"
            | "that"
            | "the"
            | "this"
            | "to"
            | "was"
            | "we"
            | "with"
            | "you"
    )
}
