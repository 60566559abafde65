//! # Key-Value Storage Port
//!
//! The durable schema every component persists through. Production hosts plug
//! in a disk-backed store; tests use [`InMemoryKVStore`].
//!
//! ## Key Layout
//!
//! | Prefix | Key | Value |
//! |--------|-----|-------|
//! | `c:` | content hash | pointer list |
//! | `k:` | pointer | chunk bytes |
//! | `n:` | sequence number (BE u64) | inscription id |
//! | `e:` | inscription id | inscription record |
//! | `u:` | content-URI hash | first sequence number using it |
//! | `p:` | protocol name | handler address |
//! | `t:` | ticker key | token info |
//! | `i:` | inscription id | token item |

use crate::entities::{Address, Hash};
use crate::errors::KVStoreError;
use std::collections::BTreeMap;

/// Abstract interface for key-value database operations.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch succeed, or NONE are applied.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// Iterate over keys with a prefix, in key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// In-memory store, ordered so prefix scans are deterministic.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.data.remove(key);
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.data.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    self.data.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        Ok(self
            .data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

/// Key constructors for the persisted layout.
pub mod keys {
    use super::{Address, Hash};

    pub const CONTENT_POINTERS: &[u8] = b"c:";
    pub const CONTENT_CHUNK: &[u8] = b"k:";
    pub const SEQUENCE_TO_ID: &[u8] = b"n:";
    pub const INSCRIPTION: &[u8] = b"e:";
    pub const CONTENT_URI: &[u8] = b"u:";
    pub const PROTOCOL: &[u8] = b"p:";
    pub const TOKEN_INFO: &[u8] = b"t:";
    pub const TOKEN_ITEM: &[u8] = b"i:";

    fn prefixed(prefix: &[u8], body: &[u8]) -> Vec<u8> {
        let mut key = Vec::with_capacity(prefix.len() + body.len());
        key.extend_from_slice(prefix);
        key.extend_from_slice(body);
        key
    }

    pub fn content_pointers(content_hash: &Hash) -> Vec<u8> {
        prefixed(CONTENT_POINTERS, content_hash.as_bytes())
    }

    pub fn content_chunk(pointer: &Address) -> Vec<u8> {
        prefixed(CONTENT_CHUNK, pointer.as_bytes())
    }

    /// Big-endian so a prefix scan walks sequence numbers in order.
    pub fn sequence_to_id(sequence_number: u64) -> Vec<u8> {
        prefixed(SEQUENCE_TO_ID, &sequence_number.to_be_bytes())
    }

    pub fn inscription(id: &Hash) -> Vec<u8> {
        prefixed(INSCRIPTION, id.as_bytes())
    }

    pub fn content_uri(content_uri_hash: &Hash) -> Vec<u8> {
        prefixed(CONTENT_URI, content_uri_hash.as_bytes())
    }

    pub fn protocol(name: &str) -> Vec<u8> {
        prefixed(PROTOCOL, name.as_bytes())
    }

    pub fn token_info(ticker_key: &Hash) -> Vec<u8> {
        prefixed(TOKEN_INFO, ticker_key.as_bytes())
    }

    pub fn token_item(id: &Hash) -> Vec<u8> {
        prefixed(TOKEN_ITEM, id.as_bytes())
    }
}

// =============================================================================
// TESTS
// =============================================================================
