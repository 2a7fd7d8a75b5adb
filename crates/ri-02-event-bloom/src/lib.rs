//! # Event Bloom (ri-02)
//!
//! Builds the per-height bloom filter over emitted events that the receipt
//! index stores next to each block's success-hash list.
//!
//! ## Invariants
//!
//! - **No false negatives**: every address and topic of every event passed to
//!   `build` is reported by `might_contain` on the decoded bloom.
//! - **Fixed size**: the blob is always `size_bits / 8` bytes, including for
//!   an empty event set.
//!
//! ## Usage Example
//!
//! ```ignore
//! use ri_02_event_bloom::{EventBloom, EventBloomBuilder, EventBloomConfig};
//!
//! let builder = EventBloomBuilder::new(EventBloomConfig::default());
//! let bytes = builder.build(&events);
//!
//! let bloom = EventBloom::from_bytes(&bytes, builder.config())?;
//! assert!(bloom.might_contain(&events[0].address));
//! ```

pub mod domain;
pub mod error;

pub use domain::{BloomFilter, EventBloom, EventBloomBuilder, EventBloomConfig};
pub use error::BloomError;
