//! Adapters for the outbound ports.

pub mod bloom;
pub mod serializer;

pub use serializer::BincodeReceiptSerializer;
