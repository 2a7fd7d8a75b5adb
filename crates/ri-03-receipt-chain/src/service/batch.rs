//! # Write Batch
//!
//! Buffers puts and deletes for one commit. Nothing reaches the store until
//! `commit`, which hands every staged operation to `atomic_batch_write` as a
//! single unit.

use crate::ports::outbound::{BatchOperation, KeyValueStore};
use ri_01_kv_store::KVStoreError;
use std::collections::BTreeMap;

/// Staged operations keyed by store key. A later stage on the same key
/// replaces the earlier one; `None` marks a delete.
#[derive(Debug, Default)]
pub struct WriteBatch {
    staged: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard anything left staged by an earlier, uncommitted use.
    pub fn begin(&mut self) {
        if !self.staged.is_empty() {
            tracing::debug!(discarded = self.staged.len(), "[ri-03] discarding stale staged writes");
        }
        self.staged.clear();
    }

    pub fn set(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.staged.insert(key.into(), Some(value.into()));
    }

    pub fn delete(&mut self, key: impl Into<Vec<u8>>) {
        self.staged.insert(key.into(), None);
    }

    /// What this batch would leave under `key`.
    ///
    /// `None` if the key is untouched, `Some(None)` if staged for deletion.
    pub fn staged(&self, key: &[u8]) -> Option<Option<&[u8]>> {
        self.staged.get(key).map(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Drop all staged operations without touching the store.
    pub fn rollback(&mut self) {
        self.staged.clear();
    }

    /// Apply every staged operation atomically. The batch is empty
    /// afterwards whether or not the write succeeded.
    pub fn commit<KV: KeyValueStore>(&mut self, store: &KV) -> Result<(), KVStoreError> {
        let operations: Vec<BatchOperation> = std::mem::take(&mut self.staged)
            .into_iter()
            .map(|(key, value)| match value {
                Some(value) => BatchOperation::Put { key, value },
                None => BatchOperation::Delete { key },
            })
            .collect();

        if operations.is_empty() {
            return Ok(());
        }
        store.atomic_batch_write(operations)
    }
}
