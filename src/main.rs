use std::sync::Arc;

use axum::http::HeaderValue;
use jsonapi_file::{
    adapters::{repositories::FileUserRepository, routes::build_router, state::AppState},
    application::repositories::user_repository::UserRepository,
    domain::config::{global::UploadConfig, local::LocalConfig},
    services,
};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real deployments set the variables directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let local_config = LocalConfig::from_env().expect("ERROR: invalid server configuration");
    let upload_config = UploadConfig::from_env().expect("ERROR: invalid upload configuration");

    tracing::info!(
        resource_type = %upload_config.resource_type,
        max_size = upload_config.max_size,
        "Starting jsonapi-file"
    );

    let cors = match &local_config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<HeaderValue> = allowed_origins
                .iter()
                .map(|s| s.parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    };

    let (storage_service, user_repository) = tokio::join!(
        async {
            services::create_storage_service(&local_config)
                .await
                .expect("ERROR: failed to prepare storage roots")
        },
        async {
            Arc::new(
                FileUserRepository::load(&local_config.users_file)
                    .await
                    .expect("ERROR: failed to load users file"),
            ) as Arc<dyn UserRepository>
        }
    );

    tracing::info!("Storage schemes: {:?}", storage_service.schemes());

    let app_state = AppState::new(
        "jsonapi-file",
        upload_config,
        storage_service,
        user_repository,
        local_config.anonymous_permissions.clone(),
    );

    let router = build_router(app_state).layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", local_config.port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", local_config.port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
