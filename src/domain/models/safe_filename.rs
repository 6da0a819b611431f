use crate::domain::config::global::UploadConfig;

/// Suffix appended to filenames whose extension could be executed by a web server.
pub const NEUTRAL_SUFFIX: &str = ".txt";

/// The filename actually used for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeFilename {
    pub original_name: String,
    pub final_name: String,
    pub was_rewritten: bool,
}

impl SafeFilename {
    /// Appends `.txt` when the final extension is on the denylist.
    ///
    /// Only the last suffix is inspected, so `archive.php.jpg` is kept as is and
    /// an already rewritten `name.php.txt` is never rewritten twice.
    pub fn derive(filename: &str, config: &UploadConfig) -> Self {
        let dangerous = extension(filename)
            .map(|ext| config.is_dangerous_extension(ext))
            .unwrap_or(false);

        let final_name = if dangerous {
            format!("{}{}", filename, NEUTRAL_SUFFIX)
        } else {
            filename.to_string()
        };

        Self {
            original_name: filename.to_string(),
            final_name,
            was_rewritten: dangerous,
        }
    }
}

/// Text after the last `.`; a name without a dot has no extension.
pub fn extension(filename: &str) -> Option<&str> {
    filename.rsplit_once('.').map(|(_, ext)| ext)
}
