//! Storage Adapters
//!
//! Implementations of the `KeyValueStore` trait.

mod file;
mod memory;

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

pub use file::FileBackedKVStore;
pub use memory::{InMemoryKVStore, InMemorySnapshot};

use crate::ports::BatchOperation;
use std::collections::HashMap;

pub(crate) type Table = HashMap<Vec<u8>, Vec<u8>>;

/// Apply a batch to a map in order; later operations on a key win.
pub(crate) fn apply_operations(table: &mut Table, operations: Vec<BatchOperation>) {
    for op in operations {
        match op {
            BatchOperation::Put { key, value } => {
                table.insert(key, value);
            }
            BatchOperation::Delete { key } => {
                table.remove(&key);
            }
        }
    }
}
