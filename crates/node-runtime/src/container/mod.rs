//! # Component Container
//!
//! Configuration and wiring of the Inscription-Chain components.
//!
//! ## Dependency Order
//!
//! ```text
//! ContentStore ──→ InscriptionRegistry ──→ HandlerHost ──→ TokenProtocolHandler
//!                          │                                      │
//!                          └──────────→ ProofQueue                FixedCapacityToken
//! ```

pub mod chain;
pub mod config;

pub use chain::InscriptionChain;
pub use config::{ChainConfig, ConfigError, SystemAddresses, TokenProtocolConfig, DEFAULT_TOKEN_PROTOCOL};

use crate::genesis::GenesisError;
use ic_01_content_store::ContentError;
use ic_03_inscription_registry::RegistryError;
use ic_04_token_protocol::ProtocolError;
use ic_05_proof_queue::ProofError;
use thiserror::Error;

/// Errors surfaced by the runtime facade.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Content store error: {0}")]
    Content(#[from] ContentError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Token protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Proof queue error: {0}")]
    Proof(#[from] ProofError),

    #[error("Genesis error: {0}")]
    Genesis(#[from] GenesisError),
}
