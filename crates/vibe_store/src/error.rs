//! Error types for the saved-trail store.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid user id: {0:?}")]
    InvalidUser(String),

    #[error("Saved trail not found: {0}")]
    NotFound(Uuid),

    #[error("Corrupt saved trail at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
