use async_trait::async_trait;

use crate::domain::models::user::CallerIdentity;

#[async_trait]
pub trait AccessService: Send + Sync {
    async fn has_capability(&self, identity: &CallerIdentity, capability: &str) -> bool;
}
