//! # Receipt Entities
//!
//! Transaction receipts and the event records they carry.
//!
//! ## Clusters
//!
//! - **Identity**: `TxHash`, `Address`
//! - **Execution Result**: `Receipt`, `TxStatus`, `EventRecord`

use serde::{Deserialize, Serialize};

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A transaction hash.
///
/// Kept as raw bytes rather than a fixed array: the index accepts whatever
/// hash width the execution layer produces, and an empty hash marks a
/// malformed receipt.
pub type TxHash = Vec<u8>;

/// A contract or account address as emitted by the execution layer.
pub type Address = Vec<u8>;

/// Render the first bytes of a hash for log lines and error messages.
pub fn short_hash(hash: &[u8]) -> String {
    if hash.is_empty() {
        return "<empty>".to_string();
    }
    let prefix = &hash[..hash.len().min(8)];
    if hash.len() > 8 {
        format!("{}..", hex::encode(prefix))
    } else {
        hex::encode(prefix)
    }
}

// =============================================================================
// CLUSTER B: EXECUTION RESULT
// =============================================================================

/// Outcome of executing a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TxStatus {
    /// Execution completed and state changes were applied.
    #[default]
    Success,
    /// Execution reverted or failed.
    Failure,
}

impl TxStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, TxStatus::Success)
    }
}

/// A log entry emitted during execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventRecord {
    /// Emitting contract.
    pub address: Address,
    /// Indexed topics, in emission order.
    pub topics: Vec<Vec<u8>>,
    /// Unindexed payload.
    pub data: Vec<u8>,
}

impl EventRecord {
    pub fn new(address: impl Into<Address>, topics: Vec<Vec<u8>>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            address: address.into(),
            topics,
            data: data.into(),
        }
    }
}

/// The receipt of one executed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Receipt {
    /// Hash of the transaction this receipt belongs to.
    pub tx_hash: TxHash,
    /// Height of the block that included the transaction.
    pub block_height: u64,
    /// Position of the transaction within its block.
    pub transaction_index: u32,
    /// Execution outcome.
    pub status: TxStatus,
    /// Gas consumed by the transaction.
    pub gas_used: u64,
    /// Address of the contract created by the transaction, if any.
    pub contract_address: Option<Address>,
    /// Events emitted, in emission order.
    pub logs: Vec<EventRecord>,
}

impl Receipt {
    /// Create a receipt with the fields the index cares about.
    pub fn new(tx_hash: impl Into<TxHash>, status: TxStatus, logs: Vec<EventRecord>) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            status,
            logs,
            ..Default::default()
        }
    }

    /// Set the block position of this receipt.
    pub fn at(mut self, block_height: u64, transaction_index: u32) -> Self {
        self.block_height = block_height;
        self.transaction_index = transaction_index;
        self
    }

    /// A receipt without a transaction hash cannot be keyed and is ignored.
    pub fn is_keyable(&self) -> bool {
        !self.tx_hash.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hash_truncates_long_hashes() {
        assert_eq!(short_hash(&[0xAB; 32]), "abababababababab..");
        assert_eq!(short_hash(&[0x01, 0x02]), "0102");
        assert_eq!(short_hash(&[]), "<empty>");
    }

    #[test]
    fn test_receipt_builder() {
        let receipt = Receipt::new(vec![0x11; 32], TxStatus::Failure, vec![]).at(7, 3);

        assert_eq!(receipt.block_height, 7);
        assert_eq!(receipt.transaction_index, 3);
        assert!(!receipt.status.is_success());
        assert!(receipt.is_keyable());
        assert!(!Receipt::default().is_keyable());
    }

    #[test]
    fn test_receipt_bincode_preserves_logs() {
        let receipt = Receipt::new(
            vec![0x22; 32],
            TxStatus::Success,
            vec![EventRecord::new(vec![0xAA; 20], vec![vec![0x01; 32]], vec![9, 9])],
        );

        let bytes = bincode::serialize(&receipt).unwrap();
        let decoded: Receipt = bincode::deserialize(&bytes).unwrap();

        assert_eq!(decoded, receipt);
    }
}
