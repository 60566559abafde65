//! # Error Types
//!
//! Handler errors never escape to the registry as `Err`: they become the
//! revert reason of a failed call.

use ic_02_fixed_token::TokenError;
use primitive_types::U256;
use shared_types::{Address, KVStoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("token {tick} already deployed")]
    AlreadyDeployed { tick: String },

    #[error("invalid max supply: zero or out of range")]
    InvalidMaxSupply,

    #[error("invalid mint amount: zero or out of range")]
    InvalidMintAmount,

    #[error("max supply {max_supply} not divisible by mint amount {mint_amount}")]
    NotDivisible { max_supply: U256, mint_amount: U256 },

    #[error("token {tick} not deployed")]
    NotDeployed { tick: String },

    #[error("mint amount mismatch: expected {expected}, got {actual}")]
    AmountMismatch { expected: U256, actual: U256 },

    #[error("invalid mint id {id}: must be between 1 and {max}")]
    InvalidMintId { id: U256, max: U256 },

    #[error("only registry: caller {caller}")]
    OnlyRegistry { caller: Address },

    #[error("invalid tick {0:?}")]
    InvalidTick(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("unknown function {0}")]
    UnknownFunction(String),

    #[error("token error: {0}")]
    Token(#[from] TokenError),

    #[error("storage error: {0}")]
    Storage(#[from] KVStoreError),

    #[error("encoding error: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::InvalidPayload(err.to_string())
    }
}

impl From<bincode::Error> for ProtocolError {
    fn from(err: bincode::Error) -> Self {
        ProtocolError::Encoding(err.to_string())
    }
}
