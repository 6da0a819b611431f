use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::{
    application::{repositories::user_repository::UserRepository, services::AccessService},
    domain::models::user::CallerIdentity,
};

/// Grants capabilities from the caller's user record, or from the anonymous
/// permission list for callers without one.
pub struct PermissionAccessService {
    users: Arc<dyn UserRepository>,
    anonymous_permissions: Vec<String>,
}

impl PermissionAccessService {
    pub fn new(users: Arc<dyn UserRepository>, anonymous_permissions: Vec<String>) -> Self {
        Self {
            users,
            anonymous_permissions,
        }
    }
}

#[async_trait]
impl AccessService for PermissionAccessService {
    async fn has_capability(&self, identity: &CallerIdentity, capability: &str) -> bool {
        match identity {
            CallerIdentity::Anonymous => self.anonymous_permissions.iter().any(|p| p == capability),
            CallerIdentity::Authenticated { username } => {
                match self.users.find_by_username(username).await {
                    Ok(Some(user)) => user.has_permission(capability),
                    Ok(None) => false,
                    Err(e) => {
                        error!("Permission lookup failed for {}: {:?}", username, e);
                        false
                    }
                }
            }
        }
    }
}
