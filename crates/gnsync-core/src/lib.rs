//! Shared types and the error taxonomy for gnsync.

pub mod error;
pub mod types;

pub use error::SyncError;
pub use types::{ContentFormat, FileStatus};
