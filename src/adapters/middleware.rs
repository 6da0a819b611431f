use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::warn;

use crate::application::services::{AuthService, BasicCredentials};

/// Resolves the caller and stores a `CallerIdentity` in the request extensions.
pub async fn authenticate_caller(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let credentials = basic_credentials(request.headers());
    let identity = auth_service.authenticate(credentials).await;
    request.extensions_mut().insert(identity);

    next.run(request).await
}

/// Reads `Authorization: Basic ...`; anything unreadable counts as no credentials.
pub fn basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    let value = headers.get(header::AUTHORIZATION)?;

    let Ok(value) = value.to_str() else {
        warn!("Authorization header contains invalid UTF-8");
        return None;
    };

    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = match STANDARD.decode(encoded.trim()) {
        Ok(decoded) => decoded,
        Err(_) => {
            warn!("Basic credentials are not valid base64");
            return None;
        }
    };

    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
