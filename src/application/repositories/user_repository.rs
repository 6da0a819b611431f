use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::user::User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApplicationError>;
}
