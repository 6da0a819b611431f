use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    adapters::routes::collection_path,
    application::{
        repositories::user_repository::UserRepository,
        services::{AuthService, StorageService, UploadService},
    },
    domain::config::global::UploadConfig,
    services::PermissionAccessService,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    #[from_ref(skip)]
    pub service_name: String,
    #[from_ref(skip)]
    pub collection_path: String,
    pub auth_service: Arc<AuthService>,
    pub upload_service: Arc<UploadService>,
    pub storage_service: Arc<dyn StorageService>,
}

impl AppState {
    pub fn new(
        service_name: impl Into<String>,
        upload_config: UploadConfig,
        storage_service: Arc<dyn StorageService>,
        user_repository: Arc<dyn UserRepository>,
        anonymous_permissions: Vec<String>,
    ) -> Self {
        let access_service = Arc::new(PermissionAccessService::new(
            user_repository.clone(),
            anonymous_permissions,
        ));
        let collection_path = collection_path(&upload_config.resource_type);

        Self {
            service_name: service_name.into(),
            collection_path,
            auth_service: Arc::new(AuthService::new(user_repository)),
            upload_service: Arc::new(UploadService::new(
                storage_service.clone(),
                access_service,
                Arc::new(upload_config),
            )),
            storage_service,
        }
    }
}
