//! # Domain Errors
//!
//! Error types for the receipt chain store.

use ri_01_kv_store::KVStoreError;
use shared_types::{short_hash, TxHash};
use thiserror::Error;

/// Errors returned by the receipt chain store.
///
/// Every error from `commit_block` leaves durable state as it was before the
/// call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptStoreError {
    /// No stored receipt for this hash.
    #[error("Receipt not found: {}", short_hash(.tx_hash))]
    NotFound { tx_hash: TxHash },

    /// The persisted chain violates its own invariants.
    #[error("Chain corruption: {0}")]
    Corruption(#[from] ChainCorruption),

    /// A node or hash list failed to encode or decode.
    #[error(transparent)]
    Encoding(#[from] SerializationError),

    /// Propagated from the key-value layer.
    #[error("Storage error: {0}")]
    Storage(#[from] KVStoreError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Ways the persisted chain can be found broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainCorruption {
    /// `size` is non-zero but a head or tail pointer is empty.
    #[error("size is {size} but {field} is empty")]
    MissingPointer { field: &'static str, size: u64 },

    /// The size key does not hold an 8-byte integer.
    #[error("size value has {len} bytes, expected 8")]
    InvalidSizeEncoding { len: usize },

    /// `tail` names a node that is not stored.
    #[error("tail node {} is missing", short_hash(.tail))]
    MissingTailNode { tail: TxHash },

    /// The chain ended before enough nodes were evicted.
    #[error("evicted {evicted} of {requested} nodes before the chain ended")]
    EvictionShortfall { requested: u64, evicted: u64 },

    /// Linking would push `size` past `u64::MAX`.
    #[error("size {size} cannot grow by {linked}")]
    SizeOverflow { size: u64, linked: u64 },
}

/// Codec failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Serialization error: {message}")]
pub struct SerializationError {
    pub message: String,
}

impl SerializationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
