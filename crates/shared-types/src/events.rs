//! # Event Log
//!
//! Every observable state change is reported as a [`Log`] tagged with the
//! address of the component that emitted it. Indexers replay these in order.

use crate::entities::{Address, Bytes, Hash, InscriptionId, U256};
use serde::{Deserialize, Serialize};

/// A log entry emitted by a component at `address`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// Emitting component.
    pub address: Address,
    /// Decoded event.
    pub event: Event,
}

impl Log {
    #[must_use]
    pub fn new(address: Address, event: Event) -> Self {
        Self { address, event }
    }
}

/// Events emitted by the registry, the token contracts and protocol handlers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// ERC-721 ownership movement of the token with id `token_id`.
    Transfer {
        from: Address,
        to: Address,
        token_id: u64,
    },
    /// Registry-level ownership movement of an inscription.
    EthscriptionTransferred {
        id: InscriptionId,
        from: Address,
        to: Address,
        sequence_number: u64,
    },
    /// An inscription was created.
    EthscriptionCreated {
        id: InscriptionId,
        creator: Address,
        initial_owner: Address,
        content_hash: Hash,
        content_uri_hash: Hash,
        sequence_number: u64,
    },
    /// A protocol name was bound to a handler.
    ProtocolRegistered { name: String, handler: Address },
    /// A handler call returned successfully.
    ProtocolHandlerSuccess {
        id: InscriptionId,
        protocol: String,
        output: Bytes,
    },
    /// A handler call failed; the enclosing operation still committed.
    ProtocolHandlerFailed {
        id: InscriptionId,
        protocol: String,
        reason: Bytes,
    },
    /// ERC-20 balance movement.
    TokenTransfer {
        from: Address,
        to: Address,
        value: U256,
    },
    /// A fixed-denomination token was deployed.
    TokenDeployed {
        tick: String,
        token: Address,
        max_supply: U256,
        mint_amount: U256,
        deploy_id: InscriptionId,
    },
    /// A lot was minted against a mint inscription.
    TokenMinted {
        tick: String,
        id: InscriptionId,
        to: Address,
        amount: U256,
        mint_id: U256,
    },
    /// A lot followed its inscription to a new owner.
    TokenLotTransferred {
        tick: String,
        id: InscriptionId,
        from: Address,
        to: Address,
        amount: U256,
    },
}
