use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unknown storage scheme: {0}")]
    UnknownScheme(String),

    #[error("Storage root unavailable: {0}")]
    ConfigError(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::UnknownScheme(scheme) => {
                ApplicationError::MalformedDocument(format!("Unknown storage scheme '{}'", scheme))
            }
            StorageError::ConfigError(msg) | StorageError::WriteFailed(msg) => {
                ApplicationError::StorageFailure(msg)
            }
            StorageError::Io(e) => ApplicationError::StorageFailure(e.to_string()),
        }
    }
}
