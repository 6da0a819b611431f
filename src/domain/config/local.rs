use std::{collections::BTreeMap, path::PathBuf};

use crate::domain::config::error::ConfigError;

/// Storage schemes and the environment variable that roots each one.
pub const SCHEME_ROOT_VARS: &[(&str, &str)] = &[
    ("public", "PUBLIC_FILES_ROOT"),
    ("private", "PRIVATE_FILES_ROOT"),
    ("temporary", "TEMPORARY_FILES_ROOT"),
];

const DEFAULT_PUBLIC_ROOT: &str = "./files/public";
const DEFAULT_USERS_FILE: &str = "./users.json";
const DEFAULT_PORT: u16 = 8080;

/// Settings owned by this server instance.
#[derive(Debug, Clone)]
pub struct LocalConfig {
    pub port: u16,
    pub storage_roots: BTreeMap<String, PathBuf>,
    pub users_file: PathBuf,
    pub anonymous_permissions: Vec<String>,
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl LocalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(port) => port.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let mut storage_roots = BTreeMap::new();
        for &(scheme, var) in SCHEME_ROOT_VARS {
            let root = lookup(var).filter(|value| !value.trim().is_empty());
            match (root, scheme) {
                (Some(root), _) => {
                    storage_roots.insert(scheme.to_string(), PathBuf::from(root.trim()));
                }
                (None, "public") => {
                    storage_roots.insert(scheme.to_string(), PathBuf::from(DEFAULT_PUBLIC_ROOT));
                }
                (None, _) => {}
            }
        }

        let users_file = lookup("USERS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_FILE));

        let anonymous_permissions = lookup("ANONYMOUS_PERMISSIONS")
            .map(|raw| split_list(&raw))
            .unwrap_or_default();

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS").map(|raw| split_list(&raw));

        Ok(Self {
            port,
            storage_roots,
            users_file,
            anonymous_permissions,
            cors_allowed_origins,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_scheme_is_always_rooted() {
        let config = LocalConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.storage_roots.get("public"),
            Some(&PathBuf::from("./files/public"))
        );
        assert!(!config.storage_roots.contains_key("private"));
        assert!(config.anonymous_permissions.is_empty());
        assert!(config.cors_allowed_origins.is_none());
    }

    #[test]
    fn reads_roots_and_permission_lists() {
        let config = LocalConfig::from_lookup(|key| match key {
            "PORT" => Some("9000".to_string()),
            "PRIVATE_FILES_ROOT" => Some("/srv/private".to_string()),
            "ANONYMOUS_PERMISSIONS" => Some("create files, access content".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(
            config.storage_roots.get("private"),
            Some(&PathBuf::from("/srv/private"))
        );
        assert_eq!(
            config.anonymous_permissions,
            vec!["create files", "access content"]
        );
    }

    #[test]
    fn rejects_invalid_port() {
        let result = LocalConfig::from_lookup(|key| (key == "PORT").then(|| "http".to_string()));

        assert!(matches!(result, Err(ConfigError::Invalid { key: "PORT", .. })));
    }
}
