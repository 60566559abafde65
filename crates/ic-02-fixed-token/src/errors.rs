//! # Error Types

use primitive_types::U256;
use shared_types::Address;
use thiserror::Error;

/// Failures of the fixed-capacity token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Caller is not the controller fixed at construction.
    #[error("only controller: caller {caller}")]
    OnlyController { caller: Address },

    /// Mint would push total supply over the cap.
    #[error("cap exceeded: supply {total_supply} + {amount} > cap {cap}")]
    CapExceeded {
        total_supply: U256,
        amount: U256,
        cap: U256,
    },

    /// Holder-initiated movement is disabled.
    #[error("operation disabled: {0}")]
    DisabledOperation(&'static str),

    /// `initialize` was already called.
    #[error("token already initialized")]
    AlreadyInitialized,

    /// Token has not been initialized yet.
    #[error("token not initialized")]
    NotInitialized,

    /// Source balance cannot cover a forced transfer.
    #[error("insufficient balance: {holder} has {available}, needs {required}")]
    InsufficientBalance {
        holder: Address,
        available: U256,
        required: U256,
    },
}
