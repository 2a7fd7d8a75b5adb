//! # Commit Path
//!
//! Links a block's receipts onto the tail, evicts from the head past the
//! bound and writes the per-height indexes. Everything is staged in the
//! `WriteBatch` and reaches the store in one `atomic_batch_write`.

use super::batch::WriteBatch;
use super::views::{read_node, read_params, Live, Staged};
use super::ReceiptChainStore;
use crate::domain::entities::{ChainNode, ChainParams, ChainReport};
use crate::domain::errors::{ChainCorruption, ReceiptStoreError};
use crate::domain::value_objects::KeyPrefix;
use crate::ports::inbound::ReceiptStoreApi;
use crate::ports::outbound::{BloomIndexBuilder, KeyValueStore, ReceiptSerializer};
use shared_types::{short_hash, Receipt, TxHash};
use std::collections::HashSet;

/// Counts from one staged commit.
#[derive(Debug, Default)]
struct CommitOutcome {
    params: ChainParams,
    linked: u64,
    evicted: u64,
    skipped: u64,
}

/// Walk from `head`, staging a delete for each node visited, for `count`
/// nodes or until the chain ends.
///
/// Nodes are read through the batch first, so nodes created or relinked
/// earlier in the same commit are seen as staged. Returns the hash the walk
/// stopped at (the new head) and how many nodes were deleted.
pub(crate) fn evict_from_head<KV, S>(
    batch: &mut WriteBatch,
    store: &KV,
    serializer: &S,
    head: &[u8],
    count: u64,
) -> Result<(TxHash, u64), ReceiptStoreError>
where
    KV: KeyValueStore,
    S: ReceiptSerializer,
{
    let mut current = head.to_vec();
    let mut evicted = 0;

    while evicted < count && !current.is_empty() {
        let node = match read_node(&Staged { batch: &*batch, store }, serializer, &current)? {
            Some(node) => node,
            None => break,
        };
        batch.delete(current);
        evicted += 1;
        current = node.next;
    }

    Ok((current, evicted))
}

fn stage_params(batch: &mut WriteBatch, params: &ChainParams) {
    batch.set(KeyPrefix::size_key(), params.size.to_le_bytes().to_vec());
    if params.is_empty() {
        batch.delete(KeyPrefix::head_key());
        batch.delete(KeyPrefix::tail_key());
    } else {
        batch.set(KeyPrefix::head_key(), params.head.clone());
        batch.set(KeyPrefix::tail_key(), params.tail.clone());
    }
}

impl<KV, S, B> ReceiptChainStore<KV, S, B>
where
    KV: KeyValueStore,
    S: ReceiptSerializer,
    B: BloomIndexBuilder,
{
    /// Stage the whole commit. Nothing touches the store here.
    fn stage_block(
        &mut self,
        receipts: &[Receipt],
        height: u64,
    ) -> Result<CommitOutcome, ReceiptStoreError> {
        let Self {
            reader,
            bloom_builder,
            config,
            batch,
            ..
        } = self;
        let store = reader.kv_store();
        let serializer = reader.serializer();

        batch.begin();

        let mut params = read_params(&Live(store))?;

        // The current tail gets its `next` rewritten by the first new receipt.
        let mut pending = if params.is_empty() {
            None
        } else {
            let tail = read_node(&Live(store), serializer, &params.tail)?.ok_or_else(|| {
                ChainCorruption::MissingTailNode {
                    tail: params.tail.clone(),
                }
            })?;
            Some(tail)
        };

        let mut seen: HashSet<&[u8]> = HashSet::new();
        let mut success_hashes: Vec<TxHash> = Vec::new();
        let mut events = Vec::new();
        let mut outcome = CommitOutcome::default();

        for receipt in receipts {
            if !receipt.is_keyable() {
                outcome.skipped += 1;
                tracing::debug!(height, "[ri-03] skipping receipt with empty tx hash");
                continue;
            }
            let tx_hash = receipt.tx_hash.as_slice();

            // Every keyable receipt feeds the height indexes, linked or not.
            if receipt.status.is_success() {
                success_hashes.push(tx_hash.to_vec());
            }
            events.extend(receipt.logs.iter().cloned());

            if KeyPrefix::is_reserved(tx_hash) {
                outcome.skipped += 1;
                tracing::warn!(
                    height,
                    tx = %short_hash(tx_hash),
                    "[ri-03] not linking receipt whose hash collides with a metadata key"
                );
                continue;
            }
            // Relinking a stored hash would close a cycle in the chain.
            if seen.contains(tx_hash) || store.exists(tx_hash)? {
                outcome.skipped += 1;
                tracing::warn!(
                    height,
                    tx = %short_hash(tx_hash),
                    "[ri-03] receipt already linked, indexing only"
                );
                continue;
            }
            seen.insert(tx_hash);

            match pending.take() {
                Some(mut prev) => {
                    prev.next = tx_hash.to_vec();
                    let encoded = serializer.encode_node(&prev)?;
                    batch.set(prev.receipt.tx_hash, encoded);
                }
                None => params.head = tx_hash.to_vec(),
            }

            params.tail = tx_hash.to_vec();
            pending = Some(ChainNode::tail(receipt.clone()));
            outcome.linked += 1;
        }

        if outcome.linked > 0 {
            if let Some(tail) = pending {
                let encoded = serializer.encode_node(&tail)?;
                batch.set(tail.receipt.tx_hash, encoded);
            }
            params.size = params.size.checked_add(outcome.linked).ok_or(
                ChainCorruption::SizeOverflow {
                    size: params.size,
                    linked: outcome.linked,
                },
            )?;
        }

        if params.size > config.max_receipts {
            let requested = params.size - config.max_receipts;
            let (new_head, evicted) =
                evict_from_head(batch, store, serializer, &params.head, requested)?;
            if evicted < requested {
                return Err(ChainCorruption::EvictionShortfall { requested, evicted }.into());
            }
            params.head = new_head;
            params.size -= evicted;
            outcome.evicted = evicted;
        }

        stage_params(batch, &params);

        batch.set(KeyPrefix::bloom_key(height), bloom_builder.build(&events));
        batch.set(
            KeyPrefix::tx_hashes_key(height),
            serializer.encode_hashes(&success_hashes)?,
        );

        outcome.params = params;
        Ok(outcome)
    }

    /// Discard staged state after a failed commit.
    fn abort(&mut self, height: u64, error: ReceiptStoreError) -> ReceiptStoreError {
        self.batch.rollback();
        self.metrics.record_failure();

        if matches!(error, ReceiptStoreError::Corruption(_)) {
            tracing::error!(height, error = %error, "[ri-03] commit aborted: receipt chain is corrupt");
        } else {
            tracing::warn!(height, error = %error, "[ri-03] commit aborted");
        }
        error
    }
}

impl<KV, S, B> ReceiptStoreApi for ReceiptChainStore<KV, S, B>
where
    KV: KeyValueStore,
    S: ReceiptSerializer,
    B: BloomIndexBuilder,
{
    fn commit_block(&mut self, receipts: &[Receipt], height: u64) -> Result<(), ReceiptStoreError> {
        if receipts.is_empty() || self.config.max_receipts == 0 {
            return Ok(());
        }

        let outcome = match self.stage_block(receipts, height) {
            Ok(outcome) => outcome,
            Err(e) => return Err(self.abort(height, e)),
        };

        if let Err(e) = self.batch.commit(self.reader.kv_store()) {
            return Err(self.abort(height, e.into()));
        }

        self.metrics
            .record_commit(outcome.linked, outcome.evicted, outcome.skipped);

        tracing::debug!(
            height,
            linked = outcome.linked,
            evicted = outcome.evicted,
            skipped = outcome.skipped,
            size = outcome.params.size,
            head = %short_hash(&outcome.params.head),
            tail = %short_hash(&outcome.params.tail),
            "[ri-03] block receipts committed"
        );

        Ok(())
    }

    fn verify_chain(&self) -> Result<ChainReport, ReceiptStoreError> {
        self.reader.verify_chain()
    }

    fn compact(&self) -> Result<(), ReceiptStoreError> {
        self.reader.kv_store().compact()?;
        tracing::info!("[ri-03] receipt store compacted");
        Ok(())
    }
}
