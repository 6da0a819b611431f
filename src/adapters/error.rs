use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::{
    adapters::dto::file_dto::{ErrorDocument, JSON_API_MEDIA_TYPE},
    application::error::ApplicationError,
};

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApplicationError::Forbidden => {
                warn!("Upload refused: missing permission");
                (
                    StatusCode::FORBIDDEN,
                    Some("The 'create files' permission is required.".to_string()),
                )
            }
            ApplicationError::MalformedDocument(msg) => {
                warn!("Malformed document: {}", msg);
                (StatusCode::UNPROCESSABLE_ENTITY, Some(msg))
            }
            ApplicationError::InvalidEncoding(msg) => {
                warn!("Invalid payload encoding: {}", msg);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Some(format!("Payload is not valid base64: {}", msg)),
                )
            }
            ApplicationError::UnsupportedMediaType => {
                warn!("Unsupported request media type");
                (
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    Some(format!("Content-Type must be {}", JSON_API_MEDIA_TYPE)),
                )
            }
            ApplicationError::PayloadTooLarge => {
                warn!("File too large");
                (StatusCode::PAYLOAD_TOO_LARGE, None)
            }
            ApplicationError::StorageFailure(msg) => {
                error!("Storage failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let title = status.canonical_reason().unwrap_or("Error");
        let body = Json(ErrorDocument::single(status.as_u16(), title, detail));

        (
            status,
            [(header::CONTENT_TYPE, JSON_API_MEDIA_TYPE)],
            body,
        )
            .into_response()
    }
}
