use serde::{Deserialize, Serialize};

/// Permission required to upload through the file collection endpoint.
pub const CREATE_FILES: &str = "create files";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl User {
    pub fn has_permission(&self, capability: &str) -> bool {
        self.permissions.iter().any(|p| p == capability)
    }
}

/// Who is calling, as resolved by the authentication middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerIdentity {
    Anonymous,
    Authenticated { username: String },
}

impl CallerIdentity {
    pub fn username(&self) -> Option<&str> {
        match self {
            CallerIdentity::Anonymous => None,
            CallerIdentity::Authenticated { username } => Some(username),
        }
    }
}
