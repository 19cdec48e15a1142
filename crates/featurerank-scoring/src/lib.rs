//! # featurerank-scoring
//!
//! RICE Scorer and Ranker.
//!
//! - [`rice_score`]: validated `(reach * impact * confidence / 100) / effort`.
//! - [`RiceScorer`]: candidate → [`ScoredFeature`](featurerank_core::ScoredFeature),
//!   separating incomplete candidates from scored ones.
//! - [`rank`]: score descending, then feedback count descending, then
//!   cluster index ascending, truncated to top-N.

pub mod ranker;
pub mod rice;

pub use ranker::{rank, ranking_order};
pub use rice::{rice_score, validate_inputs, RiceScorer, ScoringOutcome};
