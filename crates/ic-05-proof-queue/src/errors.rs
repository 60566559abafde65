//! # Error Types

use shared_types::Address;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// Only the configured flusher may drain the queue.
    #[error("unauthorized flush by {caller}")]
    Unauthorized { caller: Address },

    /// The inscription source failed to answer.
    #[error("inscription source error: {0}")]
    Source(String),
}
