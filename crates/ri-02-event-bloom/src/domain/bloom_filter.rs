//! Fixed-size Bloom filter
//!
//! INVARIANTS:
//! - No false negatives: once inserted, `contains()` returns true.
//! - The raw byte form is exactly `size_bits / 8` bytes; no header.

use bitvec::prelude::*;

use super::hash_functions::compute_hash_positions;
use crate::error::BloomError;

/// Bloom filter for probabilistic membership testing.
///
/// False positives are possible, false negatives are not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BloomFilter {
    /// Bit array storing the filter state
    bits: BitVec<u8, Lsb0>,
    /// Number of hash functions (k)
    k: usize,
    /// Size in bits (m)
    m: usize,
    /// Seed offset for the hash functions
    tweak: u32,
}

impl BloomFilter {
    /// Create an empty filter of `m` bits using `k` hash functions.
    pub fn new(m: usize, k: usize) -> Self {
        Self::new_with_tweak(m, k, 0)
    }

    /// Create an empty filter with a specific hash tweak.
    pub fn new_with_tweak(m: usize, k: usize, tweak: u32) -> Self {
        Self {
            bits: bitvec![u8, Lsb0; 0; m],
            k,
            m,
            tweak,
        }
    }

    /// Rebuild a filter from its raw bytes.
    ///
    /// The byte length determines `m`; `k` and `tweak` must match the
    /// parameters the filter was built with.
    pub fn from_raw_bytes(bytes: &[u8], k: usize, tweak: u32) -> Result<Self, BloomError> {
        if bytes.is_empty() {
            return Err(BloomError::InvalidParameters(
                "bloom bytes cannot be empty".to_string(),
            ));
        }
        let bits = BitVec::<u8, Lsb0>::from_slice(bytes);
        let m = bits.len();
        Ok(Self { bits, k, m, tweak })
    }

    /// Insert an element into the filter.
    pub fn insert(&mut self, element: &[u8]) {
        for pos in compute_hash_positions(element, self.k, self.m, self.tweak) {
            self.bits.set(pos, true);
        }
    }

    /// Test if an element might be in the filter.
    ///
    /// `false` means the element is definitely absent.
    pub fn contains(&self, element: &[u8]) -> bool {
        compute_hash_positions(element, self.k, self.m, self.tweak)
            .iter()
            .all(|&pos| self.bits[pos])
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Get the filter size in bits
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Get the number of hash functions
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Raw bit array bytes.
    pub fn as_raw_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bloom_filter_new_is_empty() {
        let filter = BloomFilter::new(2048, 3);

        assert_eq!(filter.size_bits(), 2048);
        assert_eq!(filter.hash_count(), 3);
        assert_eq!(filter.bits_set(), 0);
        assert_eq!(filter.as_raw_bytes().len(), 256);
    }

    #[test]
    fn test_bloom_filter_no_false_negatives_bulk() {
        let mut filter = BloomFilter::new(10_000, 7);
        let elements: Vec<String> = (0..1000).map(|i| format!("topic_{:04x}", i)).collect();

        for elem in &elements {
            filter.insert(elem.as_bytes());
        }

        for elem in &elements {
            assert!(filter.contains(elem.as_bytes()), "False negative for {}", elem);
        }
    }

    #[test]
    fn test_raw_bytes_reload_preserves_membership() {
        let mut filter = BloomFilter::new_with_tweak(2048, 3, 42);
        filter.insert(b"address_A");
        filter.insert(b"topic_B");

        let restored = BloomFilter::from_raw_bytes(filter.as_raw_bytes(), 3, 42).unwrap();

        assert_eq!(restored, filter);
        assert!(restored.contains(b"address_A"));
        assert!(restored.contains(b"topic_B"));
    }

    #[test]
    fn test_from_raw_bytes_rejects_empty() {
        assert!(BloomFilter::from_raw_bytes(&[], 3, 0).is_err());
    }
}
