mod candidate;
mod cluster;
mod degradation_event;
mod feedback;
mod overrides;
mod report;
mod rice;
mod scored;

pub use candidate::FeatureCandidate;
pub use cluster::ClusterAssignment;
pub use degradation_event::DegradationEvent;
pub use feedback::{EmbeddingVector, FeedbackItem};
pub use overrides::{OverrideKey, RiceOverrides};
pub use report::{PrioritizationReport, RunSummary, SkipReason, SkippedCandidate};
pub use rice::{PartialRice, RiceField, RiceInputs};
pub use scored::{PriorityLevel, ScoredFeature};
