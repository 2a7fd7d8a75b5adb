//! Event bloom configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use ri_02_event_bloom::EventBloomConfig;
//!
//! let config = EventBloomConfig::default().with_size_bits(4096).with_hash_count(4);
//! config.validate()?;
//! ```

use crate::error::BloomError;

/// Largest hash count accepted; more only adds latency at these sizes.
pub const MAX_HASH_COUNT: usize = 16;

/// Parameters of the per-height event bloom.
///
/// Every bloom written by one index must share these values, since readers
/// decode stored blobs with the same config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventBloomConfig {
    /// Filter size in bits; must be a non-zero multiple of 8
    pub size_bits: usize,
    /// Number of hash functions (k)
    pub hash_count: usize,
    /// Seed offset for the hash functions
    pub tweak: u32,
}

impl Default for EventBloomConfig {
    fn default() -> Self {
        Self {
            size_bits: 2048, // 256 bytes
            hash_count: 3,
            tweak: 0,
        }
    }
}

impl EventBloomConfig {
    /// Validate size and hash parameters
    pub fn validate(&self) -> Result<(), BloomError> {
        if self.size_bits == 0 || self.size_bits % 8 != 0 {
            return Err(BloomError::InvalidParameters(format!(
                "size_bits must be a non-zero multiple of 8, got {}",
                self.size_bits
            )));
        }

        if self.hash_count == 0 || self.hash_count > MAX_HASH_COUNT {
            return Err(BloomError::InvalidParameters(format!(
                "hash_count must be between 1 and {}, got {}",
                MAX_HASH_COUNT, self.hash_count
            )));
        }

        Ok(())
    }

    /// Size of an encoded bloom in bytes.
    pub fn size_bytes(&self) -> usize {
        self.size_bits / 8
    }

    /// Builder-style method to set the filter size
    pub fn with_size_bits(mut self, size_bits: usize) -> Self {
        self.size_bits = size_bits;
        self
    }

    /// Builder-style method to set the hash count
    pub fn with_hash_count(mut self, hash_count: usize) -> Self {
        self.hash_count = hash_count;
        self
    }

    /// Builder-style method to set the hash tweak
    pub fn with_tweak(mut self, tweak: u32) -> Self {
        self.tweak = tweak;
        self
    }
}
