//! # Domain Errors

use shared_types::{Address, KVStoreError};
use thiserror::Error;

/// Errors raised by the content store.
///
/// Unknown content is not an error: reads of an unseen hash return empty.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Underlying key-value store failed.
    #[error("storage error: {0}")]
    Storage(#[from] KVStoreError),

    /// A persisted pointer list could not be encoded or decoded.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A pointer list references a chunk that is not stored.
    #[error("missing content chunk at pointer {pointer}")]
    MissingChunk { pointer: Address },

    /// Chunk size must be positive.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,
}

impl From<bincode::Error> for ContentError {
    fn from(err: bincode::Error) -> Self {
        ContentError::Encoding(err.to_string())
    }
}
