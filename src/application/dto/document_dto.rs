use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;

use crate::{
    application::error::ApplicationError,
    domain::models::{file::UploadRequest, stream_uri::StreamUri},
};

/// Incoming `{"data": {"type", "attributes": {"data", "uri"}}}` document.
#[derive(Debug, Deserialize)]
pub struct FileDocumentDTO {
    pub data: Option<FileResourceDTO>,
}

#[derive(Debug, Deserialize)]
pub struct FileResourceDTO {
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub attributes: Option<FileAttributesDTO>,
}

#[derive(Debug, Deserialize)]
pub struct FileAttributesDTO {
    pub data: Option<String>,
    pub uri: Option<String>,
}

impl FileDocumentDTO {
    /// Checks the envelope against the targeted collection and decodes the payload.
    pub fn into_upload_request(self, resource_type: &str) -> Result<UploadRequest, ApplicationError> {
        let resource = self
            .data
            .ok_or_else(|| malformed("Missing 'data' member"))?;

        match resource.resource_type.as_deref() {
            Some(kind) if kind == resource_type => {}
            Some(kind) => {
                return Err(malformed(&format!(
                    "Resource type '{}' does not match collection '{}'",
                    kind, resource_type
                )))
            }
            None => return Err(malformed("Missing 'data.type' member")),
        }

        let attributes = resource
            .attributes
            .ok_or_else(|| malformed("Missing 'data.attributes' member"))?;

        let uri = attributes
            .uri
            .ok_or_else(|| malformed("Missing 'uri' attribute"))?;
        let encoded = attributes
            .data
            .ok_or_else(|| malformed("Missing 'data' attribute"))?;

        let destination = StreamUri::parse(&uri)?;

        let payload = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| ApplicationError::InvalidEncoding(format!("'data' attribute: {}", e)))?;

        Ok(UploadRequest::new(destination, payload))
    }
}

pub fn parse_upload_document(
    body: &[u8],
    resource_type: &str,
) -> Result<UploadRequest, ApplicationError> {
    let document: FileDocumentDTO = serde_json::from_slice(body)
        .map_err(|e| malformed(&format!("Invalid JSON document: {}", e)))?;

    document.into_upload_request(resource_type)
}

fn malformed(message: &str) -> ApplicationError {
    ApplicationError::MalformedDocument(message.to_string())
}
