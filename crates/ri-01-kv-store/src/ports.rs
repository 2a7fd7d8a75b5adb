//! # Storage Ports (Driven Ports)
//!
//! The interface the receipt index requires from its storage engine. The
//! engine's internal format (LSM tree, flat file, map) is not part of the
//! contract.

use crate::errors::KVStoreError;

/// Frozen read view of a key-value store.
///
/// Reads against a snapshot never observe batches committed after the
/// snapshot was taken.
pub trait KvSnapshot {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Abstract interface for key-value database operations.
///
/// Production: `RocksDbStore` (feature `rocksdb`)
/// Testing: `InMemoryKVStore`
///
/// All methods take `&self`; backends provide their own interior
/// synchronization so a single store can serve readers while the writer
/// commits.
pub trait KeyValueStore: Send + Sync {
    /// Read view returned by [`KeyValueStore::snapshot`].
    type Snapshot<'a>: KvSnapshot
    where
        Self: 'a;

    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Acquire a point-in-time read view.
    fn snapshot(&self) -> Result<Self::Snapshot<'_>, KVStoreError>;

    /// Compact the full key range.
    fn compact(&self) -> Result<(), KVStoreError>;

    /// Put a single key-value pair.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::put(key, value)])
    }

    /// Delete a key.
    fn delete(&self, key: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::delete(key)])
    }
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}
