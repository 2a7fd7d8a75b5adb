use super::{apply_operations, Table};
use crate::errors::KVStoreError;
use crate::ports::{BatchOperation, KeyValueStore, KvSnapshot};
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory key-value store.
///
/// The table sits behind an `Arc` so a snapshot is a pointer copy; the next
/// batch write clones the table only while a snapshot is still alive.
#[derive(Default)]
pub struct InMemoryKVStore {
    data: RwLock<Arc<Table>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    type Snapshot<'a> = InMemorySnapshot where Self: 'a;

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.read().contains_key(key))
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        // The write lock is held across the whole batch, so readers see
        // either none or all of it.
        let mut guard = self.data.write();
        apply_operations(Arc::make_mut(&mut *guard), operations);
        Ok(())
    }

    fn snapshot(&self) -> Result<Self::Snapshot<'_>, KVStoreError> {
        Ok(InMemorySnapshot::new(Arc::clone(&*self.data.read())))
    }

    fn compact(&self) -> Result<(), KVStoreError> {
        Ok(())
    }
}

/// Frozen view over an in-memory table.
#[derive(Clone)]
pub struct InMemorySnapshot {
    data: Arc<Table>,
}

impl InMemorySnapshot {
    pub(crate) fn new(data: Arc<Table>) -> Self {
        Self { data }
    }
}

impl KvSnapshot for InMemorySnapshot {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }
}
