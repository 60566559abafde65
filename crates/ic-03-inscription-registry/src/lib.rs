//! # IC-03 Inscription Registry
//!
//! The authoritative record of inscriptions and their ownership, and the
//! boundary at which protocol handlers are invoked.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | 1 | Gapless sequence numbers | `InscriptionRegistry::insert` assigns `next_sequence` |
//! | 2 | Unique ids | `validate_create` rejects a reused id |
//! | 3 | Unique content URIs unless ESIP-6 | `validate_create` |
//! | 4 | Records never deleted | no removal path; burns transfer to null |
//! | 5 | Isolated handlers | `HandlerHost` returns `CallOutcome`, never `Err` |
//! | 6 | Permanent protocol bindings | `register_protocol` rejects rebinding |
//! | 7 | Genesis replay parity | `domain::events::creation_logs` serves both paths |
//!
//! ## Crate Structure
//!
//! - `domain/` - records, intents, receipts, enumeration, errors, event builders
//! - `dispatch.rs` - handler host
//! - `service/` - the registry application service and its queries

pub mod dispatch;
pub mod domain;
pub mod service;

pub use dispatch::{HandlerHost, HANDLER_NOT_DEPLOYED};
pub use domain::{
    creation_logs, protocol_registered_log, transfer_logs, CreateParams, Enumeration,
    EnumerationError, Inscription, OriginBlock, ProtocolParams, Receipt, RegistryConfig,
    RegistryError, RegistryStats, SequentialEnumeration, SparseEnumeration, TransferParams,
};
pub use service::InscriptionRegistry;
