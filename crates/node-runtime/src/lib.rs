//! # Node Runtime Library
//!
//! Wiring for the Inscription-Chain node. Exposed as a library so the
//! scenario tests drive the same facade as the binary.
//!
//! - `container/` - configuration and the [`InscriptionChain`] facade
//! - `genesis/` - genesis file parsing and replay

pub mod container;
pub mod genesis;

pub use container::{
    ChainConfig, ChainError, ConfigError, InscriptionChain, SystemAddresses, TokenProtocolConfig,
    DEFAULT_TOKEN_PROTOCOL,
};
pub use genesis::{GenesisError, GenesisFile, GenesisInscription, GenesisProtocol};
