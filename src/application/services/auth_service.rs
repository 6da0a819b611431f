use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use tracing::{debug, error, warn};

use crate::{
    application::repositories::user_repository::UserRepository,
    domain::models::user::CallerIdentity,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Resolves request credentials to a caller identity.
///
/// Unknown users, bad passwords and repository errors all resolve to
/// [`CallerIdentity::Anonymous`]; the capability check decides what that means.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn authenticate(&self, credentials: Option<BasicCredentials>) -> CallerIdentity {
        let Some(credentials) = credentials else {
            return CallerIdentity::Anonymous;
        };

        let user = match self.users.find_by_username(&credentials.username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(username = %credentials.username, "Login attempt for unknown user");
                return CallerIdentity::Anonymous;
            }
            Err(e) => {
                error!("User lookup failed: {:?}", e);
                return CallerIdentity::Anonymous;
            }
        };

        if verify_password(&credentials.password, &user.password_hash) {
            debug!(username = %user.username, "Caller authenticated");
            CallerIdentity::Authenticated {
                username: user.username,
            }
        } else {
            warn!(username = %credentials.username, "Invalid password");
            CallerIdentity::Anonymous
        }
    }
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            error!("Stored password hash is not a valid PHC string: {}", e);
            false
        }
    }
}
