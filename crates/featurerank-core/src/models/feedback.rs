use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single piece of product feedback, as handed over by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    /// Unique within a run.
    pub id: String,
    pub text: String,
    /// Where the feedback came from, e.g. "manual" or "csv_upload".
    pub source: String,
    pub submitted_at: DateTime<Utc>,
}

impl FeedbackItem {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        source: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            source: source.into(),
            submitted_at,
        }
    }
}

/// Dense embedding of one feedback text. Length is fixed by the provider.
pub type EmbeddingVector = Vec<f32>;
