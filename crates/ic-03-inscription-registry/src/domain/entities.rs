//! # Domain Entities
//!
//! The persisted inscription record, the intents submitted by the import
//! pipeline, and the receipts returned for every mutating call.

use serde::{Deserialize, Serialize};
use shared_types::{
    Address, BlockContext, Bytes, Hash, InscriptionId, InscriptionSnapshot, Log,
};

// =============================================================================
// INSCRIPTION RECORD
// =============================================================================

/// L1 block the inscription was observed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginBlock {
    pub hash: Hash,
    pub number: u64,
    pub timestamp: u64,
}

/// A registered inscription.
///
/// Created once, never deleted. Only `current_owner` and `previous_owner`
/// change after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inscription {
    pub id: InscriptionId,
    /// SHA-256 of the raw content.
    pub content_hash: Hash,
    pub content_uri_hash: Hash,
    pub origin: OriginBlock,
    pub creator: Address,
    pub initial_owner: Address,
    pub current_owner: Address,
    pub previous_owner: Address,
    pub mimetype: String,
    /// 0-based creation index; doubles as the token id.
    pub sequence_number: u64,
    pub esip6: bool,
    /// Associated protocol; empty when none.
    pub protocol: String,
    /// Local block the record was created in.
    pub created_at: BlockContext,
}

impl Inscription {
    #[must_use]
    pub fn is_burned(&self) -> bool {
        self.current_owner.is_zero()
    }

    #[must_use]
    pub fn has_protocol(&self) -> bool {
        !self.protocol.is_empty()
    }

    /// Read-only view handed to protocol handlers.
    #[must_use]
    pub fn snapshot(&self) -> InscriptionSnapshot {
        InscriptionSnapshot {
            id: self.id,
            sequence_number: self.sequence_number,
            creator: self.creator,
            initial_owner: self.initial_owner,
            current_owner: self.current_owner,
            previous_owner: self.previous_owner,
            content_hash: self.content_hash,
            mimetype: self.mimetype.clone(),
        }
    }
}

// =============================================================================
// INTENTS
// =============================================================================

/// Protocol operation carried by a creation intent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// Registered protocol name; empty means "no protocol".
    pub name: String,
    /// Operation, dispatched as `op_<operation>`.
    pub operation: String,
    /// Opaque payload interpreted by the handler.
    pub data: Bytes,
}

/// Creation intent from the import pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateParams {
    pub id: InscriptionId,
    pub content_uri_hash: Hash,
    pub initial_owner: Address,
    pub content: Bytes,
    pub mimetype: String,
    /// Allows reuse of an already-seen content URI.
    pub esip6: bool,
    pub protocol: Option<ProtocolParams>,
    pub origin: OriginBlock,
}

impl CreateParams {
    /// The protocol to associate, if one is named.
    #[must_use]
    pub fn protocol_name(&self) -> Option<&str> {
        self.protocol
            .as_ref()
            .map(|p| p.name.as_str())
            .filter(|name| !name.is_empty())
    }
}

/// Transfer intent from the import pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferParams {
    pub to: Address,
    pub id: InscriptionId,
    /// When set, the transfer only applies if the recorded previous owner matches.
    pub expected_previous_owner: Option<Address>,
}

// =============================================================================
// RECEIPTS & CONFIG
// =============================================================================

/// Result of a committed registry call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Receipt<T = ()> {
    /// Call-specific return value.
    pub output: T,
    /// Events in emission order, including any genesis replay.
    pub logs: Vec<Log>,
    /// Inscriptions whose state became observable through this call.
    pub touched: Vec<InscriptionId>,
}

impl<T> Receipt<T> {
    pub fn new(output: T) -> Self {
        Self {
            output,
            logs: Vec::new(),
            touched: Vec::new(),
        }
    }
}

/// Counters exposed for monitoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub created: u64,
    pub transferred: u64,
    pub handler_successes: u64,
    pub handler_failures: u64,
    pub genesis_replayed: u64,
}

/// Well-known addresses the registry needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// The registry's own address; emitted on logs and passed as handler caller.
    pub address: Address,
    /// The only account allowed to register protocols.
    pub protocol_admin: Address,
}
