//! Content store configuration.

use crate::domain::errors::ContentError;
use serde::{Deserialize, Serialize};

/// EIP-170 code size limit (24,576 bytes) minus one leading STOP byte.
pub const DEFAULT_CHUNK_SIZE: usize = 24_575;

/// Tunables for chunked content storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Maximum bytes per stored chunk.
    pub chunk_size: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ContentConfig {
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.chunk_size == 0 {
            return Err(ContentError::InvalidChunkSize);
        }
        Ok(())
    }
}
