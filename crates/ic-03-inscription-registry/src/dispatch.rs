//! # Handler Host
//!
//! Deployed protocol handler contracts, addressable by their address. Every
//! call returns a [`CallOutcome`]; nothing a handler does can make the
//! calling registry operation fail.

use shared_types::{Address, CallContext, CallOutcome, SharedHandler};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Revert reason for calls to an address with no attached contract.
pub const HANDLER_NOT_DEPLOYED: &str = "handler not deployed";

/// Address → handler contract.
#[derive(Default)]
pub struct HandlerHost {
    handlers: HashMap<Address, SharedHandler>,
}

impl HandlerHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a handler at its own address, replacing any previous contract
    /// there.
    pub fn attach(&mut self, handler: SharedHandler) -> Address {
        let address = handler.read().address();
        debug!(%address, "Handler attached");
        self.handlers.insert(address, handler);
        address
    }

    #[must_use]
    pub fn is_deployed(&self, address: Address) -> bool {
        self.handlers.contains_key(&address)
    }

    /// Invokes `function` on the handler at `address`.
    pub fn call(
        &self,
        address: Address,
        ctx: &CallContext,
        function: &str,
        data: &[u8],
    ) -> CallOutcome {
        match self.handlers.get(&address) {
            Some(handler) => handler.write().call(ctx, function, data),
            None => {
                warn!(%address, function, "Call to undeployed handler");
                CallOutcome::failure(HANDLER_NOT_DEPLOYED)
            }
        }
    }

    /// Delivers an ownership-change notification to the handler at `address`.
    pub fn notify_transfer(
        &self,
        address: Address,
        ctx: &CallContext,
        from: Address,
        to: Address,
    ) -> CallOutcome {
        match self.handlers.get(&address) {
            Some(handler) => handler.write().on_transfer(ctx, from, to),
            None => {
                warn!(%address, "Transfer notification to undeployed handler");
                CallOutcome::failure(HANDLER_NOT_DEPLOYED)
            }
        }
    }
}

impl std::fmt::Debug for HandlerHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerHost")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
