use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::models::file::StoredFile;

pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

#[derive(Debug, Serialize)]
pub struct FileResourceDocument {
    pub data: FileResourceObject,
}

#[derive(Debug, Serialize)]
pub struct FileResourceObject {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    pub attributes: FileAttributes,
    pub links: ResourceLinks,
}

#[derive(Debug, Serialize)]
pub struct FileAttributes {
    pub filename: String,
    pub uri: String,
    pub filemime: String,
    pub filesize: u64,
    pub status: bool,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ResourceLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

#[derive(Debug, Serialize)]
pub struct Link {
    pub href: String,
}

impl FileResourceDocument {
    /// Wraps a freshly stored file as a new resource under `collection_path`.
    pub fn created(stored: StoredFile, resource_type: &str, collection_path: &str) -> Self {
        let id = Uuid::new_v4().to_string();
        let href = format!("{}/{}", collection_path.trim_end_matches('/'), id);

        Self {
            data: FileResourceObject {
                resource_type: resource_type.to_string(),
                id,
                attributes: FileAttributes {
                    filename: stored.filename,
                    uri: stored.uri,
                    filemime: stored.mime_type,
                    filesize: stored.size,
                    status: true,
                    created: stored.created,
                },
                links: ResourceLinks {
                    self_link: Link { href },
                },
            },
        }
    }

    pub fn self_href(&self) -> &str {
        &self.data.links.self_link.href
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Serialize)]
pub struct ErrorObject {
    pub status: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorDocument {
    pub fn single(status: u16, title: &str, detail: Option<String>) -> Self {
        Self {
            errors: vec![ErrorObject {
                status: status.to_string(),
                title: title.to_string(),
                detail,
            }],
        }
    }
}
