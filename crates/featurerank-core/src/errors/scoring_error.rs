/// RICE scorer errors that are not attributable to one input field.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("RICE score is not finite ({value}); inputs are too large")]
    NonFiniteScore { value: f64 },
}
