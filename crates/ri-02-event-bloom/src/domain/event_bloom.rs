//! Per-height event bloom
//!
//! Indexes the emitting address and every topic of each event so that a
//! reader can skip heights that cannot hold a matching event.

use shared_types::EventRecord;

use super::bloom_filter::BloomFilter;
use super::config::EventBloomConfig;
use crate::error::BloomError;

/// Turns the events of one block into a fixed-size bloom blob.
#[derive(Clone, Debug, Default)]
pub struct EventBloomBuilder {
    config: EventBloomConfig,
}

impl EventBloomBuilder {
    pub fn new(config: EventBloomConfig) -> Self {
        Self { config }
    }

    /// Validated constructor.
    pub fn try_new(config: EventBloomConfig) -> Result<Self, BloomError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &EventBloomConfig {
        &self.config
    }

    /// Build the bloom over `events`.
    ///
    /// Always returns exactly `size_bits / 8` bytes. An empty slice yields
    /// an all-zero blob.
    pub fn build(&self, events: &[EventRecord]) -> Vec<u8> {
        let mut filter = BloomFilter::new_with_tweak(
            self.config.size_bits,
            self.config.hash_count,
            self.config.tweak,
        );

        for event in events {
            if !event.address.is_empty() {
                filter.insert(&event.address);
            }
            for topic in &event.topics {
                filter.insert(topic);
            }
        }

        filter.as_raw_bytes().to_vec()
    }
}

/// Decoded event bloom, ready for membership queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventBloom {
    filter: BloomFilter,
}

impl EventBloom {
    /// Decode a stored bloom blob.
    ///
    /// Fails if the blob length does not match the configured size.
    pub fn from_bytes(bytes: &[u8], config: &EventBloomConfig) -> Result<Self, BloomError> {
        let expected = config.size_bytes();
        if bytes.len() != expected {
            return Err(BloomError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let filter = BloomFilter::from_raw_bytes(bytes, config.hash_count, config.tweak)?;
        Ok(Self { filter })
    }

    /// `false` means no event at this height carries `item` as its address
    /// or as one of its topics.
    pub fn might_contain(&self, item: &[u8]) -> bool {
        self.filter.contains(item)
    }

    /// True if the bloom may hold every address and topic of `event`.
    pub fn might_contain_event(&self, event: &EventRecord) -> bool {
        (event.address.is_empty() || self.might_contain(&event.address))
            && event.topics.iter().all(|t| self.might_contain(t))
    }

    pub fn bits_set(&self) -> usize {
        self.filter.bits_set()
    }

    pub fn is_empty(&self) -> bool {
        self.bits_set() == 0
    }
}
