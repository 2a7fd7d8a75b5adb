//! # Receipt Chain Store (ri-03)
//!
//! Durable, bounded index of transaction receipts for the execution layer.
//! Receipts are kept as a singly linked list on top of a key-value store,
//! oldest at `head`, newest at `tail`, with the extent recorded in a persisted
//! `(size, head, tail)` triple. Each committed height also gets an event bloom
//! and the list of its successful transaction hashes.
//!
//! ## Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Chain integrity | Walking `next` from `head` `size` times reaches `tail`, whose `next` is empty |
//! | Pointer validity | `size == 0` iff `head` and `tail` are empty; otherwise both resolve to stored nodes |
//! | FIFO eviction | Past `max_receipts`, the oldest nodes are removed first |
//! | Atomic commit | A commit applies every staged key or none of them |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - entities, errors, configuration, metrics
//! - `ports/` - inbound API, outbound codec and bloom builder
//! - `adapters/` - bincode codec, event bloom builder
//! - `service/` - `ReceiptChainStore`, `ReceiptReader`, `ReceiptSnapshot`
//!
//! ## Usage
//!
//! ```ignore
//! use ri_03_receipt_chain::{
//!     InMemoryKVStore, ReceiptChainStore, ReceiptQueryApi, ReceiptStoreApi, ReceiptStoreConfig,
//! };
//!
//! let config = ReceiptStoreConfig::default().apply_env_overrides();
//! let mut store = ReceiptChainStore::open(InMemoryKVStore::new(), config)?;
//!
//! store.commit_block(&receipts, height)?;
//! let receipt = store.get(&receipts[0].tx_hash)?;
//!
//! // Concurrent queries
//! let reader = store.reader();
//! let successes = reader.tx_hashes(height)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::BincodeReceiptSerializer;
pub use domain::entities::{ChainNode, ChainParams, ChainReport};
pub use domain::errors::{ChainCorruption, ReceiptStoreError, SerializationError};
pub use domain::metrics::ReceiptStoreMetrics;
pub use domain::value_objects::{KeyPrefix, ReceiptStoreConfig, MAX_RECEIPTS_ENV};
pub use ports::inbound::{ReceiptQueryApi, ReceiptStoreApi};
pub use ports::outbound::{BloomIndexBuilder, ReceiptSerializer};
pub use service::{
    ReceiptChainStore, ReceiptReader, ReceiptSnapshot, ReceiptStoreDependencies, WriteBatch,
};

// Re-export collaborators
pub use ri_01_kv_store::{FileBackedKVStore, InMemoryKVStore, KVStoreError, KeyValueStore};
pub use ri_02_event_bloom::{EventBloom, EventBloomBuilder, EventBloomConfig};

#[cfg(feature = "rocksdb")]
pub use ri_01_kv_store::{RocksDbConfig, RocksDbStore};
