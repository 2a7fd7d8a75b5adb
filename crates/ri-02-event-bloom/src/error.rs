//! Error types for the event bloom crate

use thiserror::Error;

/// Errors raised while configuring or decoding event blooms
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BloomError {
    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("Bloom size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}
