use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::adapters::{
    controllers::{file_controller::FileController, health_controller::HealthController},
    middleware::authenticate_caller,
    state::AppState,
};

/// Headroom for the JSON envelope around the base64 payload.
const ENVELOPE_ALLOWANCE: usize = 64 * 1024;

/// `file--document` is served at `/jsonapi/file/document`.
pub fn collection_path(resource_type: &str) -> String {
    format!("/jsonapi/{}", resource_type.replacen("--", "/", 1))
}

pub fn build_router(app_state: AppState) -> Router {
    let body_limit = match app_state.upload_service.config().max_size {
        0 => DefaultBodyLimit::disable(),
        max_size => DefaultBodyLimit::max(encoded_request_limit(max_size)),
    };

    let upload_routes = Router::new()
        .route(
            &app_state.collection_path,
            post(FileController::create_file),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            authenticate_caller,
        ))
        .layer(body_limit);

    Router::new()
        .route("/health", get(HealthController::health_check))
        .merge(upload_routes)
        .with_state(app_state)
}

/// Largest request body that can still decode to `max_size` bytes.
fn encoded_request_limit(max_size: u64) -> usize {
    let encoded = max_size.div_ceil(3).saturating_mul(4);
    usize::try_from(encoded)
        .unwrap_or(usize::MAX)
        .saturating_add(ENVELOPE_ALLOWANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_path_follows_resource_type() {
        assert_eq!(collection_path("file--document"), "/jsonapi/file/document");
        assert_eq!(collection_path("file--image"), "/jsonapi/file/image");
    }

    #[test]
    fn request_limit_covers_base64_growth() {
        assert_eq!(encoded_request_limit(3), 4 + ENVELOPE_ALLOWANCE);
        assert_eq!(encoded_request_limit(4), 8 + ENVELOPE_ALLOWANCE);
    }
}
