//! # Read Views
//!
//! The chain is read from three places: the live store, a frozen snapshot,
//! and the live store overlaid with a batch still being staged. The readers
//! below are written once against `PointLookup` and shared by all three.

use super::batch::WriteBatch;
use crate::domain::entities::{ChainNode, ChainParams, ChainReport};
use crate::domain::errors::{ChainCorruption, ReceiptStoreError};
use crate::domain::value_objects::KeyPrefix;
use crate::ports::outbound::{KeyValueStore, KvSnapshot, ReceiptSerializer};
use ri_01_kv_store::KVStoreError;
use shared_types::{Receipt, TxHash};

pub(crate) trait PointLookup {
    fn lookup(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;
}

/// Committed state of the store.
pub(crate) struct Live<'a, KV>(pub &'a KV);

impl<KV: KeyValueStore> PointLookup for Live<'_, KV> {
    fn lookup(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.0.get(key)
    }
}

/// A point-in-time snapshot.
pub(crate) struct Frozen<T>(pub T);

impl<T: KvSnapshot> PointLookup for Frozen<T> {
    fn lookup(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.0.get(key)
    }
}

/// Committed state as the staged batch would leave it.
pub(crate) struct Staged<'a, KV> {
    pub batch: &'a WriteBatch,
    pub store: &'a KV,
}

impl<KV: KeyValueStore> PointLookup for Staged<'_, KV> {
    fn lookup(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        match self.batch.staged(key) {
            Some(staged) => Ok(staged.map(<[u8]>::to_vec)),
            None => self.store.get(key),
        }
    }
}

fn decode_size(bytes: &[u8]) -> Result<u64, ChainCorruption> {
    <[u8; 8]>::try_from(bytes)
        .map(u64::from_le_bytes)
        .map_err(|_| ChainCorruption::InvalidSizeEncoding { len: bytes.len() })
}

/// Read `(size, head, tail)`. A missing or zero size is an empty chain.
pub(crate) fn read_params(view: &impl PointLookup) -> Result<ChainParams, ReceiptStoreError> {
    let size = match view.lookup(&KeyPrefix::size_key())? {
        Some(bytes) => decode_size(&bytes)?,
        None => return Ok(ChainParams::empty()),
    };
    if size == 0 {
        return Ok(ChainParams::empty());
    }

    let head = view.lookup(&KeyPrefix::head_key())?.unwrap_or_default();
    if head.is_empty() {
        return Err(ChainCorruption::MissingPointer { field: "head", size }.into());
    }
    let tail = view.lookup(&KeyPrefix::tail_key())?.unwrap_or_default();
    if tail.is_empty() {
        return Err(ChainCorruption::MissingPointer { field: "tail", size }.into());
    }

    Ok(ChainParams { size, head, tail })
}

/// Node stored under `tx_hash`. Reserved keys never hold a node.
pub(crate) fn read_node<S: ReceiptSerializer>(
    view: &impl PointLookup,
    serializer: &S,
    tx_hash: &[u8],
) -> Result<Option<ChainNode>, ReceiptStoreError> {
    if tx_hash.is_empty() || KeyPrefix::is_reserved(tx_hash) {
        return Ok(None);
    }
    match view.lookup(tx_hash)? {
        Some(bytes) => Ok(Some(serializer.decode_node(&bytes)?)),
        None => Ok(None),
    }
}

pub(crate) fn read_receipt<S: ReceiptSerializer>(
    view: &impl PointLookup,
    serializer: &S,
    tx_hash: &[u8],
) -> Result<Receipt, ReceiptStoreError> {
    read_node(view, serializer, tx_hash)?
        .map(|node| node.receipt)
        .ok_or_else(|| ReceiptStoreError::NotFound {
            tx_hash: tx_hash.to_vec(),
        })
}

pub(crate) fn read_bloom(
    view: &impl PointLookup,
    height: u64,
) -> Result<Option<Vec<u8>>, ReceiptStoreError> {
    Ok(view.lookup(&KeyPrefix::bloom_key(height))?)
}

pub(crate) fn read_tx_hashes<S: ReceiptSerializer>(
    view: &impl PointLookup,
    serializer: &S,
    height: u64,
) -> Result<Vec<TxHash>, ReceiptStoreError> {
    match view.lookup(&KeyPrefix::tx_hashes_key(height))? {
        Some(bytes) => Ok(serializer.decode_hashes(&bytes)?),
        None => Ok(Vec::new()),
    }
}

/// Walk from `head` for at most `size + 1` nodes.
pub(crate) fn walk_chain<S: ReceiptSerializer>(
    view: &impl PointLookup,
    serializer: &S,
) -> Result<ChainReport, ReceiptStoreError> {
    let params = read_params(view)?;
    let mut current = params.head.clone();
    let mut report = ChainReport {
        params,
        walked: 0,
        last: Vec::new(),
        terminated: false,
        missing: None,
    };

    while !current.is_empty() && report.walked <= report.params.size {
        match read_node(view, serializer, &current)? {
            Some(node) => {
                report.walked += 1;
                report.terminated = node.is_tail();
                report.last = current;
                current = node.next;
            }
            None => {
                report.missing = Some(current);
                break;
            }
        }
    }

    Ok(report)
}
