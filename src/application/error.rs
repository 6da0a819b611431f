use crate::domain::models::stream_uri::UriError;

#[derive(Debug)]
pub enum ApplicationError {
    Forbidden,
    MalformedDocument(String),
    InvalidEncoding(String),
    UnsupportedMediaType,
    PayloadTooLarge,
    StorageFailure(String),
}

impl From<UriError> for ApplicationError {
    fn from(error: UriError) -> Self {
        ApplicationError::MalformedDocument(error.to_string())
    }
}
