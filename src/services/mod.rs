mod error;
mod local_storage;
mod permission_access;

pub use error::StorageError;
pub use local_storage::LocalStorageService;
pub use permission_access::PermissionAccessService;

use std::sync::Arc;

use crate::{application::services::StorageService, domain::config::local::LocalConfig};

pub async fn create_storage_service(
    config: &LocalConfig,
) -> Result<Arc<dyn StorageService>, StorageError> {
    let service = LocalStorageService::new(config.storage_roots.clone()).await?;
    Ok(Arc::new(service))
}
