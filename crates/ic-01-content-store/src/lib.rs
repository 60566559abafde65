//! # IC-01 Content Store
//!
//! Content-addressed storage for inscription payloads.
//!
//! ## Purpose
//!
//! Raw content is hashed with SHA-256 and stored at most once. Payloads are
//! split into chunks no larger than the maximum deployable code size minus one
//! STOP byte, each chunk living under a pointer derived from
//! `keccak256(content_hash ‖ chunk_index)`.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | 1 | Deduplication | `ContentStore::store` reuses an existing pointer list |
//! | 2 | Round-trip | `read(store(bytes)) == bytes`, including empty input |
//! | 3 | Atomic writes | all chunks and the pointer list land in one batch |
//!
//! ## Usage
//!
//! ```ignore
//! use ic_01_content_store::{ContentConfig, ContentStore};
//! use shared_types::InMemoryKVStore;
//!
//! let mut store = ContentStore::new(InMemoryKVStore::new(), ContentConfig::default())?;
//! let hash = store.store(b"data:,hello")?;
//! assert_eq!(store.read(&hash)?, b"data:,hello");
//! ```

pub mod domain;
pub mod service;

pub use domain::config::{ContentConfig, DEFAULT_CHUNK_SIZE};
pub use domain::errors::ContentError;
pub use domain::pointer::chunk_pointer;
pub use service::{ContentStore, PreparedContent};
