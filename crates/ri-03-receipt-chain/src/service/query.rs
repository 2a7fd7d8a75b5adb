//! # Read Side
//!
//! Implements `ReceiptQueryApi` for the store, its reader handles and
//! snapshots.

use super::views::{
    read_bloom, read_params, read_receipt, read_tx_hashes, walk_chain, Frozen, Live,
};
use super::ReceiptChainStore;
use crate::domain::entities::{ChainParams, ChainReport};
use crate::domain::errors::ReceiptStoreError;
use crate::ports::inbound::ReceiptQueryApi;
use crate::ports::outbound::{BloomIndexBuilder, KeyValueStore, ReceiptSerializer};
use shared_types::{Receipt, TxHash};
use std::sync::Arc;

/// Read handle sharing the store with its writer.
///
/// Every read sees either the state before a commit or after it, never a
/// half-applied batch.
pub struct ReceiptReader<KV, S> {
    kv_store: Arc<KV>,
    serializer: Arc<S>,
}

impl<KV, S> Clone for ReceiptReader<KV, S> {
    fn clone(&self) -> Self {
        Self {
            kv_store: Arc::clone(&self.kv_store),
            serializer: Arc::clone(&self.serializer),
        }
    }
}

impl<KV: KeyValueStore, S: ReceiptSerializer> ReceiptReader<KV, S> {
    pub fn new(kv_store: Arc<KV>, serializer: Arc<S>) -> Self {
        Self {
            kv_store,
            serializer,
        }
    }

    pub fn kv_store(&self) -> &KV {
        &self.kv_store
    }

    pub(crate) fn serializer(&self) -> &S {
        &self.serializer
    }

    pub(crate) fn params(&self) -> Result<ChainParams, ReceiptStoreError> {
        read_params(&Live(self.kv_store.as_ref()))
    }

    /// Freeze the current committed state.
    ///
    /// ## Errors
    ///
    /// - `Storage`: the store could not produce a snapshot
    pub fn snapshot(&self) -> Result<ReceiptSnapshot<'_, KV, S>, ReceiptStoreError> {
        let view = self.kv_store.snapshot()?;
        Ok(ReceiptSnapshot {
            view: Frozen(view),
            serializer: self.serializer.as_ref(),
        })
    }

    /// Walk the committed chain from `head`.
    pub fn verify_chain(&self) -> Result<ChainReport, ReceiptStoreError> {
        walk_chain(&Live(self.kv_store.as_ref()), self.serializer.as_ref())
    }
}

impl<KV: KeyValueStore, S: ReceiptSerializer> ReceiptQueryApi for ReceiptReader<KV, S> {
    fn get(&self, tx_hash: &[u8]) -> Result<Receipt, ReceiptStoreError> {
        read_receipt(&Live(self.kv_store.as_ref()), self.serializer.as_ref(), tx_hash)
    }

    fn chain_params(&self) -> Result<ChainParams, ReceiptStoreError> {
        self.params()
    }

    fn bloom_filter(&self, height: u64) -> Result<Option<Vec<u8>>, ReceiptStoreError> {
        read_bloom(&Live(self.kv_store.as_ref()), height)
    }

    fn tx_hashes(&self, height: u64) -> Result<Vec<TxHash>, ReceiptStoreError> {
        read_tx_hashes(&Live(self.kv_store.as_ref()), self.serializer.as_ref(), height)
    }
}

/// Queries against the store as it was when the snapshot was taken.
pub struct ReceiptSnapshot<'a, KV, S>
where
    KV: KeyValueStore + 'a,
{
    view: Frozen<KV::Snapshot<'a>>,
    serializer: &'a S,
}

impl<KV: KeyValueStore, S: ReceiptSerializer> ReceiptSnapshot<'_, KV, S> {
    /// Walk the chain as of the snapshot.
    pub fn verify_chain(&self) -> Result<ChainReport, ReceiptStoreError> {
        walk_chain(&self.view, self.serializer)
    }
}

impl<KV: KeyValueStore, S: ReceiptSerializer> ReceiptQueryApi for ReceiptSnapshot<'_, KV, S> {
    fn get(&self, tx_hash: &[u8]) -> Result<Receipt, ReceiptStoreError> {
        read_receipt(&self.view, self.serializer, tx_hash)
    }

    fn chain_params(&self) -> Result<ChainParams, ReceiptStoreError> {
        read_params(&self.view)
    }

    fn bloom_filter(&self, height: u64) -> Result<Option<Vec<u8>>, ReceiptStoreError> {
        read_bloom(&self.view, height)
    }

    fn tx_hashes(&self, height: u64) -> Result<Vec<TxHash>, ReceiptStoreError> {
        read_tx_hashes(&self.view, self.serializer, height)
    }
}

impl<KV, S, B> ReceiptQueryApi for ReceiptChainStore<KV, S, B>
where
    KV: KeyValueStore,
    S: ReceiptSerializer,
    B: BloomIndexBuilder,
{
    fn get(&self, tx_hash: &[u8]) -> Result<Receipt, ReceiptStoreError> {
        self.reader.get(tx_hash)
    }

    fn chain_params(&self) -> Result<ChainParams, ReceiptStoreError> {
        self.reader.chain_params()
    }

    fn bloom_filter(&self, height: u64) -> Result<Option<Vec<u8>>, ReceiptStoreError> {
        self.reader.bloom_filter(height)
    }

    fn tx_hashes(&self, height: u64) -> Result<Vec<TxHash>, ReceiptStoreError> {
        self.reader.tx_hashes(height)
    }
}
