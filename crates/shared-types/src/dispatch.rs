//! # Protocol Dispatch Contract
//!
//! The boundary between the inscription registry and protocol handlers.
//!
//! A handler call never fails the caller: every invocation yields a tagged
//! [`CallOutcome`], and the registry decides what to report. Handlers receive a
//! read-only [`CallContext`] snapshot instead of re-entering the registry.

use crate::entities::{Address, BlockContext, Bytes, Hash, InscriptionId};
use crate::events::Log;
use parking_lot::RwLock;
use std::sync::Arc;

/// Function name prefix for creation-time operations (`op_deploy`, `op_mint`).
pub const OPERATION_PREFIX: &str = "op_";

/// Builds the handler function name for a protocol operation.
#[must_use]
pub fn operation_function(operation: &str) -> String {
    format!("{OPERATION_PREFIX}{operation}")
}

/// Read-only view of the inscription a call concerns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InscriptionSnapshot {
    pub id: InscriptionId,
    pub sequence_number: u64,
    pub creator: Address,
    pub initial_owner: Address,
    pub current_owner: Address,
    pub previous_owner: Address,
    pub content_hash: Hash,
    pub mimetype: String,
}

/// Context passed with every handler invocation.
#[derive(Clone, Debug)]
pub struct CallContext {
    /// The calling contract (the registry).
    pub caller: Address,
    /// The inscription being created or transferred.
    pub inscription: InscriptionSnapshot,
    /// Block the call executes in.
    pub block: BlockContext,
}

/// Result of a cross-contract call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallOutcome {
    /// Call returned; `logs` are the callee's events, to be kept.
    Success { output: Bytes, logs: Vec<Log> },
    /// Call reverted; the callee's state and events are discarded.
    Failure { reason: Bytes },
}

impl CallOutcome {
    /// Wraps a handler result, encoding the error's message as the revert payload.
    pub fn from_result<E: std::fmt::Display>(result: Result<(Bytes, Vec<Log>), E>) -> Self {
        match result {
            Ok((output, logs)) => Self::Success { output, logs },
            Err(e) => Self::failure(e.to_string()),
        }
    }

    /// A failure carrying a textual reason.
    pub fn failure(reason: impl AsRef<str>) -> Self {
        Self::Failure {
            reason: Bytes::from(reason.as_ref()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// A protocol handler contract.
pub trait ProtocolHandler: Send + Sync {
    /// The handler's own address.
    fn address(&self) -> Address;

    /// Invokes a creation-time entry point (`op_<operation>`) with opaque data.
    ///
    /// Unknown functions must yield [`CallOutcome::Failure`].
    fn call(&mut self, ctx: &CallContext, function: &str, data: &[u8]) -> CallOutcome;

    /// Ownership-change notification for an inscription associated with this
    /// handler's protocol.
    fn on_transfer(&mut self, ctx: &CallContext, from: Address, to: Address) -> CallOutcome;
}

/// Shared handle to a deployed handler. The host dispatches through it while
/// the runtime keeps a typed clone for queries.
pub type SharedHandler = Arc<RwLock<dyn ProtocolHandler>>;
