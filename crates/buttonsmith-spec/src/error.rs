//! Error types for snapshot storage.

use thiserror::Error;

/// Errors raised by a [`crate::snapshot::SnapshotStore`].
///
/// Restoring configuration never surfaces these; they only reach callers that
/// write snapshots or inspect a store directly.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file or a payload is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing file holds JSON that is not a key/value object.
    #[error("snapshot store is not a JSON object: {0}")]
    NotAnObject(String),
}
