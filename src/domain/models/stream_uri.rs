use std::fmt;

use thiserror::Error;

const SCHEME_SEPARATOR: &str = "://";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UriError {
    #[error("URI '{0}' has no scheme")]
    MissingScheme(String),

    #[error("URI '{0}' has no filename component")]
    MissingFilename(String),

    #[error("URI '{0}' must be relative to its scheme root")]
    AbsoluteTarget(String),

    #[error("URI '{0}' contains a relative path segment")]
    PathTraversal(String),

    #[error("URI '{0}' contains a control character")]
    ControlCharacter(String),
}

/// A scheme-qualified storage location such as `public://reports/2024.pdf`.
///
/// The value is opaque: the scheme selects a storage root and the target is a
/// relative path below it. Nothing is normalized, the target is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamUri {
    scheme: String,
    target: String,
}

impl StreamUri {
    pub fn parse(uri: &str) -> Result<Self, UriError> {
        if uri.chars().any(char::is_control) {
            return Err(UriError::ControlCharacter(uri.escape_debug().to_string()));
        }

        let (scheme, target) = uri
            .split_once(SCHEME_SEPARATOR)
            .ok_or_else(|| UriError::MissingScheme(uri.to_string()))?;

        if scheme.is_empty() {
            return Err(UriError::MissingScheme(uri.to_string()));
        }

        if target.is_empty() || target.ends_with('/') {
            return Err(UriError::MissingFilename(uri.to_string()));
        }

        if target.starts_with('/') || target.starts_with('\\') {
            return Err(UriError::AbsoluteTarget(uri.to_string()));
        }

        if target
            .split(['/', '\\'])
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(UriError::PathTraversal(uri.to_string()));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            target: target.to_string(),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Directory part of the target, without the trailing slash.
    pub fn directory(&self) -> Option<&str> {
        self.target.rsplit_once('/').map(|(dir, _)| dir)
    }

    pub fn filename(&self) -> &str {
        self.target
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.target)
    }

    /// Same scheme and directory, different filename.
    pub fn with_filename(&self, filename: &str) -> Self {
        let target = match self.directory() {
            Some(dir) => format!("{}/{}", dir, filename),
            None => filename.to_string(),
        };

        Self {
            scheme: self.scheme.clone(),
            target,
        }
    }
}

impl fmt::Display for StreamUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.scheme, SCHEME_SEPARATOR, self.target)
    }
}
