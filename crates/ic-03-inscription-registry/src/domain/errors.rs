//! # Domain Errors
//!
//! Every variant reverts the call that produced it; no state changes.

use crate::domain::enumeration::EnumerationError;
use ic_01_content_store::ContentError;
use shared_types::{Address, Hash, InscriptionId, KVStoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Creator is the null address.
    #[error("invalid creator: null address")]
    InvalidCreator,

    #[error("inscription {id:?} already exists")]
    AlreadyExists { id: InscriptionId },

    /// Content URI already used and the intent is not ESIP-6.
    #[error("duplicate content uri {content_uri_hash:?}")]
    DuplicateContentUri { content_uri_hash: Hash },

    /// Transfer sender is the null address.
    #[error("invalid sender: null address")]
    InvalidSender,

    #[error("inscription {id:?} not found")]
    NotFound { id: InscriptionId },

    #[error("{caller} is not the owner of {id:?} (owner {owner})")]
    NotOwner {
        id: InscriptionId,
        caller: Address,
        owner: Address,
    },

    #[error("previous owner mismatch for {id:?}: expected {expected}, recorded {actual}")]
    PreviousOwnerMismatch {
        id: InscriptionId,
        expected: Address,
        actual: Address,
    },

    #[error("no inscription transferred")]
    NothingTransferred,

    /// Genesis loading after the pending queue was flushed.
    #[error("genesis is closed")]
    GenesisClosed,

    #[error("no inscription with sequence number {0}")]
    UnknownSequenceNumber(u64),

    #[error("index {index} out of bounds")]
    IndexOutOfBounds { index: u64 },

    // ----- protocol registration -----
    #[error("unauthorized: {caller} is not the protocol admin")]
    Unauthorized { caller: Address },

    #[error("protocol {name:?} already registered")]
    AlreadyRegistered { name: String },

    #[error("invalid handler: null address")]
    InvalidHandler,

    #[error("invalid protocol name: empty")]
    InvalidProtocolName,

    // ----- infrastructure -----
    #[error("enumeration error: {0}")]
    Enumeration(#[from] EnumerationError),

    #[error("content error: {0}")]
    Content(#[from] ContentError),

    #[error("storage error: {0}")]
    Storage(#[from] KVStoreError),

    #[error("encoding error: {0}")]
    Encoding(String),
}

impl From<bincode::Error> for RegistryError {
    fn from(err: bincode::Error) -> Self {
        RegistryError::Encoding(err.to_string())
    }
}
