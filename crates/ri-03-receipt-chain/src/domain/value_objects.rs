//! # Value Objects
//!
//! Configuration and key layout for the receipt chain store.

use ri_02_event_bloom::EventBloomConfig;

/// Environment variable overriding `max_receipts`.
pub const MAX_RECEIPTS_ENV: &str = "RI_MAX_RECEIPTS";

/// Configuration for the receipt chain store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptStoreConfig {
    /// Upper bound on chained receipts (default: 100_000).
    ///
    /// Zero disables indexing: every commit is a no-op.
    pub max_receipts: u64,

    /// Parameters of the per-height event bloom.
    pub bloom: EventBloomConfig,
}

impl Default for ReceiptStoreConfig {
    fn default() -> Self {
        Self {
            max_receipts: 100_000,
            bloom: EventBloomConfig::default(),
        }
    }
}

impl ReceiptStoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of chained receipts.
    pub fn with_max_receipts(mut self, max_receipts: u64) -> Self {
        self.max_receipts = max_receipts;
        self
    }

    /// Set the event bloom parameters.
    pub fn with_bloom(mut self, bloom: EventBloomConfig) -> Self {
        self.bloom = bloom;
        self
    }

    /// Apply `RI_MAX_RECEIPTS` if set. An unparsable value is logged and
    /// the current value kept.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(raw) = std::env::var(MAX_RECEIPTS_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(max_receipts) => self.max_receipts = max_receipts,
                Err(e) => tracing::warn!(
                    value = %raw,
                    error = %e,
                    default = self.max_receipts,
                    "[ri-03] ignoring invalid {}",
                    MAX_RECEIPTS_ENV
                ),
            }
        }
        self
    }

    /// Check the bloom parameters.
    pub fn validate(&self) -> Result<(), String> {
        self.bloom.validate().map_err(|e| e.to_string())
    }
}

/// Keys for the key-value store.
///
/// Chain nodes are stored under their raw transaction hash with no prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// `receipt:size` -> u64 little-endian
    Size,
    /// `receipt:head` -> oldest hash
    Head,
    /// `receipt:tail` -> newest hash
    Tail,
    /// `bloom:{height BE}` -> event bloom bytes
    Bloom,
    /// `txhashes:{height BE}` -> encoded success-hash list
    TxHashes,
}

impl KeyPrefix {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Size => b"receipt:size",
            KeyPrefix::Head => b"receipt:head",
            KeyPrefix::Tail => b"receipt:tail",
            KeyPrefix::Bloom => b"bloom:",
            KeyPrefix::TxHashes => b"txhashes:",
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }

    pub fn size_key() -> Vec<u8> {
        KeyPrefix::Size.as_bytes().to_vec()
    }

    pub fn head_key() -> Vec<u8> {
        KeyPrefix::Head.as_bytes().to_vec()
    }

    pub fn tail_key() -> Vec<u8> {
        KeyPrefix::Tail.as_bytes().to_vec()
    }

    /// Per-height bloom key.
    pub fn bloom_key(height: u64) -> Vec<u8> {
        KeyPrefix::Bloom.key(&height.to_be_bytes())
    }

    /// Per-height success-hash list key.
    pub fn tx_hashes_key(height: u64) -> Vec<u8> {
        KeyPrefix::TxHashes.key(&height.to_be_bytes())
    }

    /// Whether `key` is one of the metadata or per-height keys, which share
    /// the key space with chain nodes.
    pub fn is_reserved(key: &[u8]) -> bool {
        let height_key = |prefix: KeyPrefix| {
            key.len() == prefix.as_bytes().len() + 8 && key.starts_with(prefix.as_bytes())
        };
        [KeyPrefix::Size, KeyPrefix::Head, KeyPrefix::Tail]
            .iter()
            .any(|prefix| key == prefix.as_bytes())
            || height_key(KeyPrefix::Bloom)
            || height_key(KeyPrefix::TxHashes)
    }
}
