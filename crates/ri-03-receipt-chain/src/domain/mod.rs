//! Domain Layer
//!
//! Entities, errors, configuration and counters. No I/O.

pub mod entities;
pub mod errors;
pub mod metrics;
pub mod value_objects;

pub use entities::{ChainNode, ChainParams, ChainReport};
pub use errors::{ChainCorruption, ReceiptStoreError, SerializationError};
pub use metrics::ReceiptStoreMetrics;
pub use value_objects::{KeyPrefix, ReceiptStoreConfig, MAX_RECEIPTS_ENV};
