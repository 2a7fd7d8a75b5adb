//! Domain Layer - Pure bloom logic
//!
//! RULES:
//! - No I/O operations
//! - Building a bloom is a pure function of its events and config

pub mod bloom_filter;
pub mod config;
pub mod event_bloom;
pub mod hash_functions;

pub use bloom_filter::BloomFilter;
pub use config::EventBloomConfig;
pub use event_bloom::{EventBloom, EventBloomBuilder};
