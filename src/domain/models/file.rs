use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::stream_uri::StreamUri;

/// A decoded upload, built once per request and consumed by the upload service.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub destination: StreamUri,
    pub payload: Vec<u8>,
}

impl UploadRequest {
    pub fn new(destination: StreamUri, payload: Vec<u8>) -> Self {
        Self {
            destination,
            payload,
        }
    }

    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }

    pub fn validate_size(&self, max_size: u64) -> bool {
        max_size == 0 || self.size() <= max_size
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    pub uri: String,
    pub filename: String,
    pub size: u64,
    pub mime_type: String,
    pub created: DateTime<Utc>,
}
