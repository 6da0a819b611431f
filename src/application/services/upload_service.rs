use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    application::{
        dto::document_dto::parse_upload_document,
        error::ApplicationError,
        services::{AccessService, StorageService},
    },
    domain::{
        config::global::UploadConfig,
        models::{
            file::StoredFile,
            safe_filename::SafeFilename,
            stream_uri::StreamUri,
            user::{CallerIdentity, CREATE_FILES},
        },
    },
};

/// Authorizes, parses, sanitizes and persists a single upload document.
pub struct UploadService {
    storage: Arc<dyn StorageService>,
    access: Arc<dyn AccessService>,
    config: Arc<UploadConfig>,
}

impl UploadService {
    pub fn new(
        storage: Arc<dyn StorageService>,
        access: Arc<dyn AccessService>,
        config: Arc<UploadConfig>,
    ) -> Self {
        Self {
            storage,
            access,
            config,
        }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Fails with `Forbidden` unless the caller may create files.
    pub async fn authorize(&self, caller: &CallerIdentity) -> Result<(), ApplicationError> {
        if !self.access.has_capability(caller, CREATE_FILES).await {
            warn!(caller = ?caller.username(), "Caller lacks '{}' permission", CREATE_FILES);
            return Err(ApplicationError::Forbidden);
        }

        Ok(())
    }

    pub async fn handle_upload(
        &self,
        body: &[u8],
        caller: &CallerIdentity,
    ) -> Result<StoredFile, ApplicationError> {
        // Nothing is parsed for callers that may not create files.
        self.authorize(caller).await?;

        let request = parse_upload_document(body, &self.config.resource_type)?;

        if !request.validate_size(self.config.max_size) {
            warn!(
                size_bytes = request.size(),
                max_size = self.config.max_size,
                "Upload payload exceeds the configured limit"
            );
            return Err(ApplicationError::PayloadTooLarge);
        }

        if !self.storage.handles_scheme(request.destination.scheme()) {
            return Err(ApplicationError::MalformedDocument(format!(
                "Unknown storage scheme '{}'",
                request.destination.scheme()
            )));
        }

        let (destination, safe_name) = sanitize_destination(&request.destination, &self.config);
        if safe_name.was_rewritten {
            warn!(
                original = %safe_name.original_name,
                renamed = %safe_name.final_name,
                "Dangerous extension rewritten"
            );
        }

        let stored = self.storage.write(&destination, request.payload).await?;

        info!(
            uri = %stored.uri,
            size_bytes = stored.size,
            caller = ?caller.username(),
            "File created"
        );

        Ok(stored)
    }
}

/// Destination with the filename swapped for its safe form.
pub fn sanitize_destination(uri: &StreamUri, config: &UploadConfig) -> (StreamUri, SafeFilename) {
    let safe_name = SafeFilename::derive(uri.filename(), config);
    let destination = if safe_name.was_rewritten {
        uri.with_filename(&safe_name.final_name)
    } else {
        uri.clone()
    };

    (destination, safe_name)
}
