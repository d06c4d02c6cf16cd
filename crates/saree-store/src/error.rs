//! Store error types.

use thiserror::Error;

/// Errors that can occur when reading or writing the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing storage.
    #[error("Failed to open storage: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// The backing storage rejected an operation.
    #[error("Storage operation failed: {0}")]
    StorageError(String),

    /// I/O error from a file-backed storage.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}
