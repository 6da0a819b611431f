use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::info;

use crate::{
    adapters::{
        dto::file_dto::{FileResourceDocument, JSON_API_MEDIA_TYPE},
        state::AppState,
    },
    application::error::ApplicationError,
    domain::models::user::CallerIdentity,
};

pub struct FileController;

impl FileController {
    /// Creates a file from a JSON:API document carrying a base64 payload.
    /// POST /jsonapi/file/document
    pub async fn create_file(
        State(app_state): State<AppState>,
        Extension(caller): Extension<CallerIdentity>,
        request: Request,
    ) -> Result<Response, ApplicationError> {
        if !is_json_api_request(request.headers()) {
            return Err(ApplicationError::UnsupportedMediaType);
        }

        // The body limit applies while buffering, so the caller is checked first.
        app_state.upload_service.authorize(&caller).await?;

        let body = Bytes::from_request(request, &app_state)
            .await
            .map_err(body_rejection)?;

        info!(
            caller = ?caller.username(),
            body_bytes = body.len(),
            "File upload requested"
        );

        let stored = app_state.upload_service.handle_upload(&body, &caller).await?;

        let document = FileResourceDocument::created(
            stored,
            &app_state.upload_service.config().resource_type,
            &app_state.collection_path,
        );
        let location = document.self_href().to_string();

        Ok((
            StatusCode::CREATED,
            [
                (header::CONTENT_TYPE, JSON_API_MEDIA_TYPE.to_string()),
                (header::LOCATION, location),
            ],
            Json(document),
        )
            .into_response())
    }
}

fn body_rejection(rejection: BytesRejection) -> ApplicationError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApplicationError::PayloadTooLarge
    } else {
        ApplicationError::MalformedDocument(rejection.body_text())
    }
}

/// `application/vnd.api+json`, optionally followed by parameters.
fn is_json_api_request(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|media_type| media_type.trim().eq_ignore_ascii_case(JSON_API_MEDIA_TYPE))
        .unwrap_or(false)
}
