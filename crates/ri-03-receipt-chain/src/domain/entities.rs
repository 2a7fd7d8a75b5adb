//! # Chain Entities
//!
//! The persisted linked-list node and the `(size, head, tail)` triple that
//! describes the extent of the receipt chain.

use serde::{Deserialize, Serialize};
use shared_types::{Receipt, TxHash};

/// A persisted receipt plus the hash of the next-inserted receipt.
///
/// Stored under its own `tx_hash`. `next` is empty while the node is the
/// tail of the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainNode {
    pub receipt: Receipt,
    pub next: TxHash,
}

impl ChainNode {
    /// A new node that is provisionally the tail.
    pub fn tail(receipt: Receipt) -> Self {
        Self {
            receipt,
            next: Vec::new(),
        }
    }

    pub fn hash(&self) -> &[u8] {
        &self.receipt.tx_hash
    }

    pub fn is_tail(&self) -> bool {
        self.next.is_empty()
    }
}

/// Extent of the chain: `size == 0` iff `head` and `tail` are both empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainParams {
    pub size: u64,
    pub head: TxHash,
    pub tail: TxHash,
}

impl ChainParams {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Result of walking the chain from `head`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReport {
    /// Parameters the walk was checked against.
    pub params: ChainParams,
    /// Nodes visited, bounded by `params.size + 1`.
    pub walked: u64,
    /// Hash of the last node reached.
    pub last: TxHash,
    /// True if the last node reached has an empty `next`.
    pub terminated: bool,
    /// A `next` pointer (or `head`) that resolved to no stored node.
    pub missing: Option<TxHash>,
}

impl ChainReport {
    /// Walk length matches `size`, ends at `tail`, and no link is dangling.
    pub fn is_intact(&self) -> bool {
        self.missing.is_none()
            && self.walked == self.params.size
            && (self.params.is_empty() || (self.terminated && self.last == self.params.tail))
    }
}
