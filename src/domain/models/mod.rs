pub mod file;
pub mod safe_filename;
pub mod stream_uri;
pub mod user;
