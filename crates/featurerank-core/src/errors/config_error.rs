/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {reason}")]
    Parse { reason: String },

    #[error("failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("invalid config value {field}: {reason}")]
    Invalid { field: String, reason: String },
}
