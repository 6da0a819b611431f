use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Cannot read {path}: {reason}")]
    Unreadable { path: String, reason: String },
}
