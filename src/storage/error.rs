//! Storage error types

use thiserror::Error;

/// Error type for durable log and snapshot operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The reading could not be serialized for the snapshot
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}
