//! Test doubles for exercising failure paths of store users.

use crate::adapters::{InMemoryKVStore, InMemorySnapshot};
use crate::errors::KVStoreError;
use crate::ports::{BatchOperation, KeyValueStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory store that fails on demand.
///
/// A failed batch write applies nothing, matching the atomicity contract of
/// real backends.
#[derive(Default)]
pub struct FaultyKVStore {
    inner: InMemoryKVStore,
    fail_batch_writes: AtomicBool,
    fail_snapshots: AtomicBool,
    batch_writes: AtomicUsize,
}

impl FaultyKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent batch write fail until disarmed.
    pub fn set_fail_batch_writes(&self, fail: bool) {
        self.fail_batch_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent snapshot acquisition fail until disarmed.
    pub fn set_fail_snapshots(&self, fail: bool) {
        self.fail_snapshots.store(fail, Ordering::SeqCst);
    }

    /// Number of successful batch writes so far.
    pub fn batch_writes(&self) -> usize {
        self.batch_writes.load(Ordering::SeqCst)
    }

    /// Direct access to the backing store, bypassing fault injection.
    pub fn inner(&self) -> &InMemoryKVStore {
        &self.inner
    }
}

impl KeyValueStore for FaultyKVStore {
    type Snapshot<'a> = InMemorySnapshot where Self: 'a;

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner.get(key)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.inner.exists(key)
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        if self.fail_batch_writes.load(Ordering::SeqCst) {
            return Err(KVStoreError::Injected {
                operation: "atomic_batch_write",
            });
        }
        self.inner.atomic_batch_write(operations)?;
        self.batch_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn snapshot(&self) -> Result<Self::Snapshot<'_>, KVStoreError> {
        if self.fail_snapshots.load(Ordering::SeqCst) {
            return Err(KVStoreError::Injected {
                operation: "snapshot",
            });
        }
        self.inner.snapshot()
    }

    fn compact(&self) -> Result<(), KVStoreError> {
        self.inner.compact()
    }
}
