//! # Key-Value Store Errors

use thiserror::Error;

/// Errors surfaced by a key-value backend.
///
/// The receipt index never retries these; they are propagated verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },

    /// A point-in-time snapshot could not be acquired.
    #[error("KV store snapshot unavailable: {message}")]
    SnapshotError { message: String },

    /// Failure raised on purpose by a test double.
    #[error("KV store injected failure: {operation}")]
    Injected { operation: &'static str },
}

impl KVStoreError {
    pub fn io(err: impl std::fmt::Display) -> Self {
        KVStoreError::IOError {
            message: err.to_string(),
        }
    }
}
