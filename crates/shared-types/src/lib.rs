//! # Shared Types Crate
//!
//! Receipt entities exchanged between the block-commit pipeline and the
//! receipt index.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Receipt` and `EventRecord` are defined here
//!   and nowhere else.
//! - **Opaque Payload**: the index reads only `tx_hash`, `status` and `logs`;
//!   every other field is stored and returned verbatim.

pub mod entities;

pub use entities::*;
