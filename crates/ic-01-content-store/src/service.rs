//! # Content Store Service
//!
//! Owns the key-value store that backs inscription content. The registry
//! reuses the same store for its own records so that content and record
//! writes can share one atomic batch (see [`ContentStore::prepare`]).

use crate::domain::config::ContentConfig;
use crate::domain::errors::ContentError;
use crate::domain::pointer::{chunk_pointer, split};
use shared_types::{keys, sha256, Address, BatchOperation, Hash, KeyValueStore};
use tracing::debug;

/// Writes needed to persist one payload, not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedContent {
    /// SHA-256 of the payload.
    pub content_hash: Hash,
    /// Batch operations; empty when the content is already stored or empty.
    pub operations: Vec<BatchOperation>,
}

/// Deduplicating, chunked content storage over a [`KeyValueStore`].
pub struct ContentStore<S: KeyValueStore> {
    kv: S,
    config: ContentConfig,
}

impl<S: KeyValueStore> ContentStore<S> {
    /// Creates a store, rejecting a zero chunk size.
    pub fn new(kv: S, config: ContentConfig) -> Result<Self, ContentError> {
        config.validate()?;
        Ok(Self { kv, config })
    }

    #[must_use]
    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Underlying key-value store.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn kv_mut(&mut self) -> &mut S {
        &mut self.kv
    }

    pub fn into_inner(self) -> S {
        self.kv
    }

    /// Computes the writes that would store `content`, without applying them.
    pub fn prepare(&self, content: &[u8]) -> Result<PreparedContent, ContentError> {
        let content_hash = sha256(content);

        if content.is_empty() || self.exists(&content_hash)? {
            return Ok(PreparedContent {
                content_hash,
                operations: Vec::new(),
            });
        }

        let mut pointers = Vec::new();
        let mut operations = Vec::new();
        for (index, chunk) in split(content, self.config.chunk_size).enumerate() {
            let pointer = chunk_pointer(&content_hash, index);
            operations.push(BatchOperation::put(keys::content_chunk(&pointer), chunk));
            pointers.push(pointer);
        }
        operations.push(BatchOperation::put(
            keys::content_pointers(&content_hash),
            bincode::serialize(&pointers)?,
        ));

        Ok(PreparedContent {
            content_hash,
            operations,
        })
    }

    /// Stores `content` and returns its SHA-256 hash.
    ///
    /// Already-stored content is not written again. Empty content writes
    /// nothing and still reads back as empty.
    pub fn store(&mut self, content: &[u8]) -> Result<Hash, ContentError> {
        let prepared = self.prepare(content)?;
        if !prepared.operations.is_empty() {
            debug!(
                content_hash = %prepared.content_hash,
                bytes = content.len(),
                chunks = prepared.operations.len() - 1,
                "Storing content"
            );
            self.kv.atomic_batch_write(prepared.operations)?;
        }
        Ok(prepared.content_hash)
    }

    /// Reads content by hash. Unknown hashes read as empty.
    pub fn read(&self, content_hash: &Hash) -> Result<Vec<u8>, ContentError> {
        let pointers = self.pointers(content_hash)?;
        let mut content = Vec::with_capacity(pointers.len() * self.config.chunk_size);
        for pointer in pointers {
            let chunk = self
                .kv
                .get(&keys::content_chunk(&pointer))?
                .ok_or(ContentError::MissingChunk { pointer })?;
            content.extend_from_slice(&chunk);
        }
        Ok(content)
    }

    /// Whether non-empty content with this hash is stored.
    pub fn exists(&self, content_hash: &Hash) -> Result<bool, ContentError> {
        Ok(self.kv.exists(&keys::content_pointers(content_hash))?)
    }

    /// Chunk pointers for `content_hash`, in order. Empty when unknown.
    pub fn pointers(&self, content_hash: &Hash) -> Result<Vec<Address>, ContentError> {
        match self.kv.get(&keys::content_pointers(content_hash))? {
            Some(raw) => Ok(bincode::deserialize(&raw)?),
            None => Ok(Vec::new()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
