//! Error types for snapshot parsing and storage backends.

use thiserror::Error;

/// A stored snapshot could not be turned back into simulation state.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Not valid JSON, or JSON of the wrong shape (missing or non-array
    /// `objects`, non-integer weights, ...).
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A key-value backend failed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Browser storage is missing or refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Filesystem error from the native store.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Loading or saving a snapshot failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Serializing the snapshot failed.
    #[error("failed to encode snapshot: {0}")]
    Encode(serde_json::Error),
}

impl PersistenceError {
    /// True when the stored data is bad (and should be discarded), as opposed
    /// to the backend itself failing.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, PersistenceError::Snapshot(_))
    }
}
