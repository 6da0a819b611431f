mod access_service;
mod auth_service;
mod storage_service;
mod upload_service;

pub use access_service::AccessService;
pub use auth_service::{AuthService, BasicCredentials};
pub use storage_service::StorageService;
pub use upload_service::{sanitize_destination, UploadService};
