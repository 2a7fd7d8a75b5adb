//! # Key-Value Store (ri-01)
//!
//! The storage contract consumed by the receipt index, plus the adapters that
//! satisfy it.
//!
//! ## Contract
//!
//! | Operation | Guarantee |
//! |-----------|-----------|
//! | `get` / `exists` | Point lookups against committed state |
//! | `atomic_batch_write` | All operations applied, or none |
//! | `snapshot` | Frozen read view; failure is an error, never a panic |
//! | `compact` | Full-range compaction on demand |
//!
//! ## Adapters
//!
//! - `InMemoryKVStore` - copy-on-write map, cheap snapshots (tests, light nodes)
//! - `FileBackedKVStore` - whole-file persistence with temp-file rename
//! - `RocksDbStore` - production backend (feature `rocksdb`)
//!
//! ## Usage
//!
//! ```ignore
//! use ri_01_kv_store::{BatchOperation, InMemoryKVStore, KeyValueStore};
//!
//! let store = InMemoryKVStore::new();
//! store.atomic_batch_write(vec![BatchOperation::put(b"k", b"v")])?;
//! let view = store.snapshot()?;
//! ```

pub mod adapters;
pub mod errors;
pub mod ports;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapters::{FileBackedKVStore, InMemoryKVStore, InMemorySnapshot};
pub use errors::KVStoreError;
pub use ports::{BatchOperation, KeyValueStore, KvSnapshot};

#[cfg(feature = "rocksdb")]
pub use adapters::rocksdb_adapter::{RocksDbConfig, RocksDbSnapshot, RocksDbStore};

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::FaultyKVStore;
