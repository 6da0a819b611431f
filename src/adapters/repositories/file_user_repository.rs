use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use tracing::info;

use crate::{
    application::{error::ApplicationError, repositories::user_repository::UserRepository},
    domain::{config::error::ConfigError, models::user::User},
};

/// Users loaded once from a JSON array and kept in memory.
pub struct FileUserRepository {
    users: HashMap<String, User>,
}

impl FileUserRepository {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.username.clone(), user))
                .collect(),
        }
    }

    /// A missing file yields an empty repository; unreadable JSON is an error.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            info!("No users file at {}, only anonymous access", path.display());
            return Ok(Self::new(Vec::new()));
        }

        let raw = tokio::fs::read(path)
            .await
            .map_err(|e| ConfigError::Unreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let users: Vec<User> =
            serde_json::from_slice(&raw).map_err(|e| ConfigError::Unreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        info!("Loaded {} users from {}", users.len(), path.display());
        Ok(Self::new(users))
    }
}

#[async_trait]
impl UserRepository for FileUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApplicationError> {
        Ok(self.users.get(username).cloned())
    }
}
