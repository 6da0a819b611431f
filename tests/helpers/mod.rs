//! Test helpers: build AppState and router over a temporary storage root.

use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Algorithm, Argon2, Params, Version,
};
use axum_test::TestServer;
use base64::{engine::general_purpose::STANDARD, Engine};
use jsonapi_file::{
    adapters::{repositories::FileUserRepository, routes::build_router, state::AppState},
    domain::{
        config::global::UploadConfig,
        models::user::{User, CREATE_FILES},
    },
    services::LocalStorageService,
};
use tempfile::TempDir;

pub const COLLECTION: &str = "/jsonapi/file/document";
pub const PAYLOAD_B64: &str = "SGV5LCBpdCB3b3JrcyE=";
pub const PAYLOAD: &[u8] = b"Hey, it works!";

pub const EDITOR: (&str, &str) = ("editor", "editor-pass");
pub const READER: (&str, &str) = ("reader", "reader-pass");

pub struct TestApp {
    pub server: TestServer,
    pub public_root: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Filesystem location of a `public://` URI.
    pub fn public_path(&self, uri: &str) -> PathBuf {
        let target = uri
            .strip_prefix("public://")
            .expect("helper only resolves public:// URIs");
        self.public_root.join(target)
    }

    pub fn uploaded_file_exists(&self, uri: &str) -> bool {
        self.public_path(uri).exists()
    }
}

#[derive(Default)]
pub struct TestOptions {
    pub upload_config: UploadConfig,
    pub anonymous_permissions: Vec<String>,
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestOptions::default()).await
}

pub async fn setup_test_app_with(options: TestOptions) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let public_root = temp_dir.path().join("public");

    let mut roots = BTreeMap::new();
    roots.insert("public".to_string(), public_root.clone());
    let storage = LocalStorageService::new(roots)
        .await
        .expect("Failed to create local storage");

    let users = FileUserRepository::new(vec![
        test_user(EDITOR, vec![CREATE_FILES.to_string()]),
        test_user(READER, vec!["access content".to_string()]),
    ]);

    let app_state = AppState::new(
        "jsonapi-file-test",
        options.upload_config,
        Arc::new(storage),
        Arc::new(users),
        options.anonymous_permissions,
    );

    let server = TestServer::new(build_router(app_state)).expect("Failed to create test server");

    TestApp {
        server,
        public_root,
        _temp_dir: temp_dir,
    }
}

fn test_user((username, password): (&str, &str), permissions: Vec<String>) -> User {
    let salt = SaltString::encode_b64(b"fixed-test-salt").expect("Invalid salt");
    // Minimal cost keeps the suite fast; verification reads the params from the hash.
    let params = Params::new(8, 1, 1, None).expect("Invalid argon2 params");
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .expect("Failed to hash test password")
        .to_string();

    User {
        username: username.to_string(),
        password_hash,
        permissions,
    }
}

pub fn basic_auth((username, password): (&str, &str)) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", username, password))
    )
}

/// Default upload document for `uri`.
pub fn document(uri: &str) -> String {
    document_with(uri, PAYLOAD_B64)
}

pub fn document_with(uri: &str, data: &str) -> String {
    serde_json::json!({
        "data": {
            "type": "file--document",
            "attributes": {
                "data": data,
                "uri": uri,
            },
        },
    })
    .to_string()
}
