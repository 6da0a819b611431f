use serde::{Deserialize, Serialize};

use crate::domain::config::error::ConfigError;

pub const DEFAULT_RESOURCE_TYPE: &str = "file--document";

pub const DEFAULT_DANGEROUS_EXTENSIONS: &[&str] = &[
    "php", "phar", "pl", "py", "cgi", "asp", "js", "html", "htm", "exe", "sh",
];

/// Upload policy shared by every request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadConfig {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    #[serde(rename = "dangerousExtensions")]
    pub dangerous_extensions: Vec<String>,
    /// Largest decoded payload in bytes; 0 disables the limit.
    #[serde(rename = "maxSize")]
    pub max_size: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            resource_type: DEFAULT_RESOURCE_TYPE.to_string(),
            dangerous_extensions: DEFAULT_DANGEROUS_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_size: 0,
        }
    }
}

impl UploadConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(resource_type) = lookup("RESOURCE_TYPE") {
            let resource_type = resource_type.trim();
            if resource_type.is_empty() {
                return Err(ConfigError::Invalid {
                    key: "RESOURCE_TYPE",
                    reason: "must not be empty".to_string(),
                });
            }
            config.resource_type = resource_type.to_string();
        }

        if let Some(extensions) = lookup("DANGEROUS_EXTENSIONS") {
            config.dangerous_extensions = parse_extension_list(&extensions);
        }

        if let Some(max_size) = lookup("MAX_UPLOAD_SIZE") {
            config.max_size = max_size
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::Invalid {
                    key: "MAX_UPLOAD_SIZE",
                    reason: e.to_string(),
                })?;
        }

        Ok(config)
    }

    pub fn is_dangerous_extension(&self, extension: &str) -> bool {
        self.dangerous_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

fn parse_extension_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = UploadConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.resource_type, "file--document");
        assert_eq!(config.max_size, 0);
        assert!(config.is_dangerous_extension("php"));
        assert!(config.is_dangerous_extension("HTM"));
        assert!(!config.is_dangerous_extension("txt"));
    }

    #[test]
    fn extension_list_accepts_commas_spaces_and_dots() {
        let config =
            UploadConfig::from_lookup(lookup(&[("DANGEROUS_EXTENSIONS", ".PHP, svg  jsp,,")]))
                .unwrap();

        assert_eq!(config.dangerous_extensions, vec!["php", "svg", "jsp"]);
    }

    #[test]
    fn rejects_bad_max_size() {
        let err = UploadConfig::from_lookup(lookup(&[("MAX_UPLOAD_SIZE", "ten")])).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "MAX_UPLOAD_SIZE",
                ..
            }
        ));
    }
}
