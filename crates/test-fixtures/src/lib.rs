//! Test fixture loader for featurerank feedback datasets, plus a
//! deterministic stub embedder and item builders.
//!
//! Datasets live in the workspace `test-fixtures/feedback/` directory as
//! JSON arrays of feedback items.

use std::path::PathBuf;

use chrono::{DateTime, Duration, TimeZone, Utc};
use featurerank_core::errors::FeatureRankResult;
use featurerank_core::models::{EmbeddingVector, FeedbackItem};
use featurerank_core::traits::IEmbeddingProvider;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let mut path = PathBuf::from(manifest_dir);
    // The crate directory is itself named test-fixtures; look for the
    // data folder instead.
    while !path.join("test-fixtures").join("feedback").is_dir() {
        if !path.pop() {
            panic!("Could not find test-fixtures/feedback above {manifest_dir}");
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

#[derive(Debug, Deserialize)]
struct FeedbackRecord {
    id: String,
    text: String,
    #[serde(default = "default_source")]
    source: String,
    #[serde(default)]
    submitted_at: Option<DateTime<Utc>>,
}

fn default_source() -> String {
    "fixture".to_string()
}

/// Load `test-fixtures/feedback/<name>.json` as feedback items.
/// Missing timestamps get [`fixed_time`].
pub fn load_feedback(name: &str) -> Vec<FeedbackItem> {
    let records: Vec<FeedbackRecord> = load_fixture(&format!("feedback/{name}.json"));
    records
        .into_iter()
        .map(|r| FeedbackItem::new(r.id, r.text, r.source, r.submitted_at.unwrap_or_else(fixed_time)))
        .collect()
}

/// A fixed timestamp so fixtures serialize identically across runs.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// One feedback item with a random v4 id.
pub fn make_item(text: &str) -> FeedbackItem {
    FeedbackItem::new(uuid::Uuid::new_v4().to_string(), text, "test", Utc::now())
}

/// Items with ids `fb-0`, `fb-1`, ... and timestamps one minute apart.
pub fn make_items(texts: &[&str]) -> Vec<FeedbackItem> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            FeedbackItem::new(
                format!("fb-{i}"),
                *text,
                "test",
                fixed_time() + Duration::minutes(i as i64),
            )
        })
        .collect()
}

/// Deterministic bag-of-words embedder.
///
/// Each significant token is hashed with blake3 into one of `dims` buckets;
/// the counts are L2-normalized. Texts sharing words land close together,
/// which is all clustering tests need.
#[derive(Debug, Clone)]
pub struct StubEmbedder {
    dims: usize,
}

impl StubEmbedder {
    pub fn new(dims: usize) -> Self {
        Self { dims: dims.max(1) }
    }

    fn bucket(&self, token: &str) -> usize {
        let hash = blake3::hash(token.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        (u64::from_le_bytes(bytes) % self.dims as u64) as usize
    }
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new(64)
    }
}

impl IEmbeddingProvider for StubEmbedder {
    fn embed(&self, text: &str) -> FeatureRankResult<EmbeddingVector> {
        let mut v = vec![0.0f32; self.dims];
        for token in text.split_whitespace() {
            let token: String = token
                .chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect();
            if token.chars().count() > 2 {
                v[self.bucket(&token)] += 1.0;
            }
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            v.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(v)
    }

    fn embed_batch(&self, texts: &[String]) -> FeatureRankResult<Vec<EmbeddingVector>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().join("feedback").is_dir());
    }

    #[test]
    fn product_feedback_loads() {
        let items = load_feedback("product_feedback");
        assert!(items.len() >= 12);
        assert!(items.iter().all(|i| !i.text.trim().is_empty()));
    }

    #[test]
    fn stub_is_deterministic_and_normalized() {
        let e = StubEmbedder::default();
        let a = e.embed("Dark mode please").unwrap();
        let b = e.embed("dark MODE, please").unwrap();
        assert_eq!(a, b);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
        assert!(e.embed("?!").unwrap().iter().all(|x| *x == 0.0));
    }

    #[test]
    fn make_items_numbers_ids() {
        let items = make_items(&["a", "b"]);
        assert_eq!(items[0].id, "fb-0");
        assert_eq!(items[1].id, "fb-1");
        assert!(items[0].submitted_at < items[1].submitted_at);
        assert_ne!(make_item("x").id, make_item("x").id);
    }
}
