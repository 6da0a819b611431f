pub mod error;
pub mod global;
pub mod local;
