//! # Receipt Chain Service
//!
//! `ReceiptChainStore` owns the write path (`commit_block` and eviction).
//! Reads go through `ReceiptReader`, which the store hands out as a cheap
//! clone so query handlers can read while the single writer commits.
//! `ReceiptSnapshot` answers the same queries against a frozen view.

mod batch;
mod commit;
mod query;
mod views;
#[cfg(test)]
mod tests;

pub use batch::WriteBatch;
pub use query::{ReceiptReader, ReceiptSnapshot};

use crate::adapters::BincodeReceiptSerializer;
use crate::domain::errors::ReceiptStoreError;
use crate::domain::metrics::ReceiptStoreMetrics;
use crate::domain::value_objects::ReceiptStoreConfig;
use crate::ports::outbound::{BloomIndexBuilder, KeyValueStore, ReceiptSerializer};
use ri_02_event_bloom::EventBloomBuilder;
use std::sync::Arc;

/// The bounded receipt chain.
///
/// Not safe for concurrent writers: `commit_block` takes `&mut self`, so one
/// owner drives all commits.
pub struct ReceiptChainStore<KV, S = BincodeReceiptSerializer, B = EventBloomBuilder>
where
    KV: KeyValueStore,
    S: ReceiptSerializer,
    B: BloomIndexBuilder,
{
    /// Shared read side; also holds the store and codec.
    pub(crate) reader: ReceiptReader<KV, S>,
    /// Builds the per-height event bloom.
    pub(crate) bloom_builder: B,
    pub(crate) config: ReceiptStoreConfig,
    /// Staged writes of the commit in progress.
    pub(crate) batch: WriteBatch,
    pub(crate) metrics: Arc<ReceiptStoreMetrics>,
}

/// Dependencies for ReceiptChainStore
pub struct ReceiptStoreDependencies<KV, S, B> {
    pub kv_store: KV,
    pub serializer: S,
    pub bloom_builder: B,
}

impl<KV, S, B> ReceiptChainStore<KV, S, B>
where
    KV: KeyValueStore,
    S: ReceiptSerializer,
    B: BloomIndexBuilder,
{
    /// Create a store over the given dependencies.
    ///
    /// ## Errors
    ///
    /// - `InvalidConfig`: the configured or injected bloom parameters are invalid
    pub fn new(
        deps: ReceiptStoreDependencies<KV, S, B>,
        config: ReceiptStoreConfig,
    ) -> Result<Self, ReceiptStoreError> {
        config.validate().map_err(ReceiptStoreError::InvalidConfig)?;
        deps.bloom_builder
            .validate()
            .map_err(ReceiptStoreError::InvalidConfig)?;

        let store = Self {
            reader: ReceiptReader::new(Arc::new(deps.kv_store), Arc::new(deps.serializer)),
            bloom_builder: deps.bloom_builder,
            config,
            batch: WriteBatch::new(),
            metrics: Arc::new(ReceiptStoreMetrics::new()),
        };

        match store.reader.params() {
            Ok(params) => tracing::info!(
                size = params.size,
                max_receipts = store.config.max_receipts,
                "[ri-03] receipt store ready"
            ),
            Err(e) => tracing::warn!(error = %e, "[ri-03] receipt store opened with unreadable chain params"),
        }

        Ok(store)
    }

    /// A cloneable read handle over the same store.
    pub fn reader(&self) -> ReceiptReader<KV, S> {
        self.reader.clone()
    }

    /// Point-in-time view for consistent multi-key reads.
    pub fn snapshot(&self) -> Result<ReceiptSnapshot<'_, KV, S>, ReceiptStoreError> {
        self.reader.snapshot()
    }

    pub fn config(&self) -> &ReceiptStoreConfig {
        &self.config
    }

    pub fn metrics(&self) -> Arc<ReceiptStoreMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Underlying key-value store.
    pub fn kv_store(&self) -> &KV {
        self.reader.kv_store()
    }
}

impl<KV: KeyValueStore> ReceiptChainStore<KV> {
    /// Store with the bincode codec and an event bloom built from
    /// `config.bloom`.
    pub fn open(kv_store: KV, config: ReceiptStoreConfig) -> Result<Self, ReceiptStoreError> {
        let bloom_builder = EventBloomBuilder::new(config.bloom.clone());
        Self::new(
            ReceiptStoreDependencies {
                kv_store,
                serializer: BincodeReceiptSerializer,
                bloom_builder,
            },
            config,
        )
    }
}
