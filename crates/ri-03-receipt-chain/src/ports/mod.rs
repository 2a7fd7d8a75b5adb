//! Ports Layer (Hexagonal Architecture)
//!
//! - `inbound`: the API this crate exposes to the block-commit pipeline
//! - `outbound`: codec, bloom builder and key-value store it depends on

pub mod inbound;
pub mod outbound;

pub use inbound::{ReceiptQueryApi, ReceiptStoreApi};
pub use outbound::{BloomIndexBuilder, ReceiptSerializer};
