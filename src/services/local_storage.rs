use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    time::Instant,
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::{fs, io::AsyncWriteExt};
use uuid::Uuid;

use crate::{
    application::{error::ApplicationError, services::StorageService},
    domain::models::{file::StoredFile, stream_uri::StreamUri},
    services::error::StorageError,
};

/// Filesystem storage with one root directory per URI scheme.
#[derive(Debug, Clone)]
pub struct LocalStorageService {
    roots: BTreeMap<String, PathBuf>,
}

impl LocalStorageService {
    /// Creates every root directory that does not exist yet.
    pub async fn new(roots: BTreeMap<String, PathBuf>) -> Result<Self, StorageError> {
        for (scheme, root) in &roots {
            fs::create_dir_all(root).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create root for {}:// at {}: {}",
                    scheme,
                    root.display(),
                    e
                ))
            })?;
        }

        Ok(Self { roots })
    }

    /// Filesystem path for a URI. `StreamUri` already refuses `..` segments.
    pub fn resolve(&self, uri: &StreamUri) -> Result<PathBuf, StorageError> {
        let root = self
            .roots
            .get(uri.scheme())
            .ok_or_else(|| StorageError::UnknownScheme(uri.scheme().to_string()))?;

        Ok(root.join(uri.target()))
    }

    async fn write_atomically(&self, path: &Path, content: &[u8]) -> Result<(), StorageError> {
        let parent = path
            .parent()
            .ok_or_else(|| StorageError::WriteFailed(format!("{} has no parent", path.display())))?;
        fs::create_dir_all(parent).await?;

        // Fixed-length name so any filename the directory accepts also fits here.
        let temp_path = parent.join(format!(".{}.part", Uuid::new_v4().simple()));

        if let Err(e) = write_and_sync(&temp_path, content).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::WriteFailed(format!(
                "Failed to write {}: {}",
                temp_path.display(),
                e
            )));
        }

        if let Err(e) = fs::rename(&temp_path, path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::WriteFailed(format!(
                "Failed to move file into {}: {}",
                path.display(),
                e
            )));
        }

        Ok(())
    }
}

async fn write_and_sync(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(content).await?;
    file.sync_all().await
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn write(&self, uri: &StreamUri, content: Vec<u8>) -> Result<StoredFile, ApplicationError> {
        let path = self.resolve(uri)?;
        let start = Instant::now();

        self.write_atomically(&path, &content).await?;

        let mime_type = mime_guess::from_path(uri.filename())
            .first_or_octet_stream()
            .to_string();

        tracing::info!(
            path = %path.display(),
            uri = %uri,
            size_bytes = content.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(StoredFile {
            uri: uri.to_string(),
            filename: uri.filename().to_string(),
            size: content.len() as u64,
            mime_type,
            created: Utc::now(),
        })
    }

    async fn exists(&self, uri: &StreamUri) -> Result<bool, ApplicationError> {
        let path = self.resolve(uri)?;
        let exists = fs::try_exists(&path).await.map_err(StorageError::Io)?;
        Ok(exists)
    }

    fn handles_scheme(&self, scheme: &str) -> bool {
        self.roots.contains_key(scheme)
    }

    fn schemes(&self) -> Vec<String> {
        self.roots.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn storage(dir: &Path) -> LocalStorageService {
        let mut roots = BTreeMap::new();
        roots.insert("public".to_string(), dir.join("public"));
        LocalStorageService::new(roots).await.unwrap()
    }

    #[tokio::test]
    async fn writes_bytes_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path()).await;
        let uri = StreamUri::parse("public://nested/deeper/hello.txt").unwrap();

        let stored = storage.write(&uri, b"hello".to_vec()).await.unwrap();

        assert_eq!(stored.uri, "public://nested/deeper/hello.txt");
        assert_eq!(stored.filename, "hello.txt");
        assert_eq!(stored.size, 5);
        assert_eq!(stored.mime_type, "text/plain");
        assert!(storage.exists(&uri).await.unwrap());
        assert_eq!(
            std::fs::read(dir.path().join("public/nested/deeper/hello.txt")).unwrap(),
            b"hello"
        );
    }

    #[tokio::test]
    async fn replaces_existing_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path()).await;
        let uri = StreamUri::parse("public://report.csv").unwrap();

        storage.write(&uri, b"old".to_vec()).await.unwrap();
        storage.write(&uri, b"new".to_vec()).await.unwrap();

        let public = dir.path().join("public");
        assert_eq!(std::fs::read(public.join("report.csv")).unwrap(), b"new");
        assert_eq!(std::fs::read_dir(&public).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn writes_filename_at_name_length_limit() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path()).await;
        let filename = format!("{}.txt", "a".repeat(240));
        let uri = StreamUri::parse(&format!("public://{}", filename)).unwrap();

        let stored = storage.write(&uri, b"long".to_vec()).await.unwrap();

        assert_eq!(stored.filename, filename);
        assert_eq!(
            std::fs::read(dir.path().join("public").join(&filename)).unwrap(),
            b"long"
        );
    }

    #[tokio::test]
    async fn exists_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path()).await;
        let uri = StreamUri::parse(&format!("public://{}.txt", "b".repeat(300))).unwrap();

        assert!(matches!(
            storage.exists(&uri).await,
            Err(ApplicationError::StorageFailure(_))
        ));
    }

    #[tokio::test]
    async fn unknown_scheme_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path()).await;
        let uri = StreamUri::parse("private://secret.txt").unwrap();

        assert!(!storage.handles_scheme("private"));
        assert!(matches!(
            storage.write(&uri, b"x".to_vec()).await,
            Err(ApplicationError::MalformedDocument(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_does_not_exist() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path()).await;
        let uri = StreamUri::parse("public://absent.txt").unwrap();

        assert!(!storage.exists(&uri).await.unwrap());
    }

    #[tokio::test]
    async fn unwritable_target_is_storage_failure() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path()).await;
        // A regular file where a directory is needed.
        std::fs::write(dir.path().join("public/blocker"), b"").unwrap();
        let uri = StreamUri::parse("public://blocker/file.txt").unwrap();

        assert!(matches!(
            storage.write(&uri, b"x".to_vec()).await,
            Err(ApplicationError::StorageFailure(_))
        ));
    }
}
