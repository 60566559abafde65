//! # Error Types
//!
//! Errors shared across components.

use thiserror::Error;

/// Errors from the key-value storage port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Stored bytes could not be decoded.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },

    /// A record that must exist is missing.
    #[error("Key not found in KV store: {key}")]
    NotFound { key: String },
}

impl KVStoreError {
    /// Wraps a decode failure for the record stored under `key`.
    pub fn corruption(key: &[u8], err: impl std::fmt::Display) -> Self {
        Self::CorruptionError {
            message: format!("{}: {err}", String::from_utf8_lossy(key)),
        }
    }
}
