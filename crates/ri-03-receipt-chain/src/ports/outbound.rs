//! # Outbound Ports (Driven Ports)
//!
//! Dependencies of the receipt chain store. The key-value store port lives in
//! `ri-01-kv-store` and is re-exported here.

use crate::domain::entities::ChainNode;
use crate::domain::errors::SerializationError;
use shared_types::{EventRecord, TxHash};

pub use ri_01_kv_store::{BatchOperation, KeyValueStore, KvSnapshot};

/// Encoding of chain nodes and per-height success-hash lists.
pub trait ReceiptSerializer: Send + Sync {
    fn encode_node(&self, node: &ChainNode) -> Result<Vec<u8>, SerializationError>;

    fn decode_node(&self, data: &[u8]) -> Result<ChainNode, SerializationError>;

    fn encode_hashes(&self, hashes: &[TxHash]) -> Result<Vec<u8>, SerializationError>;

    fn decode_hashes(&self, data: &[u8]) -> Result<Vec<TxHash>, SerializationError>;
}

/// Builds the per-height bloom blob from the events of one block.
///
/// Must be pure: the same events always yield the same bytes.
pub trait BloomIndexBuilder: Send + Sync {
    fn build(&self, events: &[EventRecord]) -> Vec<u8>;

    /// Reject parameters `build` cannot work with. Checked once at startup.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
