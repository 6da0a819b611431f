use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::{file::StoredFile, stream_uri::StreamUri},
};

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Writes the whole payload or nothing.
    async fn write(&self, uri: &StreamUri, content: Vec<u8>) -> Result<StoredFile, ApplicationError>;
    async fn exists(&self, uri: &StreamUri) -> Result<bool, ApplicationError>;
    fn handles_scheme(&self, scheme: &str) -> bool;
    fn schemes(&self) -> Vec<String>;
}
