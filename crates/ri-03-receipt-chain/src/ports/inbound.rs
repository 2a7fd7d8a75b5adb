//! # Inbound Ports (Driving Ports)
//!
//! The API the block-commit pipeline and query handlers call.

use crate::domain::entities::{ChainParams, ChainReport};
use crate::domain::errors::ReceiptStoreError;
use shared_types::{Receipt, TxHash};

/// Read side, shared by the store, its reader handles and snapshots.
pub trait ReceiptQueryApi {
    /// Fetch the receipt stored under `tx_hash`.
    ///
    /// ## Errors
    ///
    /// - `NotFound`: no node under this hash (never inserted, or evicted)
    fn get(&self, tx_hash: &[u8]) -> Result<Receipt, ReceiptStoreError>;

    /// Current `(size, head, tail)`.
    ///
    /// ## Errors
    ///
    /// - `Corruption`: size is non-zero but head or tail is empty
    fn chain_params(&self) -> Result<ChainParams, ReceiptStoreError>;

    /// Event bloom stored for `height`, if any.
    fn bloom_filter(&self, height: u64) -> Result<Option<Vec<u8>>, ReceiptStoreError>;

    /// Successful transaction hashes at `height`, in commit order. Empty if
    /// the height was never committed.
    fn tx_hashes(&self, height: u64) -> Result<Vec<TxHash>, ReceiptStoreError>;
}

/// Write side. A single logical writer per store.
pub trait ReceiptStoreApi: ReceiptQueryApi {
    /// Link `receipts` onto the chain, evict past the bound and write the
    /// per-height indexes, all in one atomic batch.
    ///
    /// No-op if `receipts` is empty or the bound is zero.
    ///
    /// ## Atomicity
    ///
    /// On any error durable state is left exactly as before the call.
    ///
    /// ## Errors
    ///
    /// - `Corruption`: tail node missing, or eviction ran off the chain
    /// - `Encoding`: a node or hash list failed to encode
    /// - `Storage`: the key-value store failed
    fn commit_block(&mut self, receipts: &[Receipt], height: u64)
        -> Result<(), ReceiptStoreError>;

    /// Walk the chain from `head` and report how it ends.
    fn verify_chain(&self) -> Result<ChainReport, ReceiptStoreError>;

    /// Full-range compaction of the underlying store.
    fn compact(&self) -> Result<(), ReceiptStoreError>;
}
