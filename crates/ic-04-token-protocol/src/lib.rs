//! # IC-04 Fixed-Denomination Token Protocol
//!
//! A protocol handler that turns inscriptions into fungible-token operations.
//!
//! - `op_deploy` creates a capped [`FixedCapacityToken`](ic_02_fixed_token::FixedCapacityToken)
//!   for a ticker at a deterministic clone address.
//! - `op_mint` attaches a fixed lot (`mint_amount`) to the minting inscription
//!   and credits its initial owner.
//! - `on_transfer` moves the lot's balance whenever the inscription changes
//!   hands, so balances always follow inscription ownership.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | 1 | One deploy per ticker | `TokenProtocolHandler::deploy` |
//! | 2 | `max_supply` divisible by `mint_amount` | `DeployParams::validate` |
//! | 3 | Mint ids within `1..=max_supply / mint_amount` | `TokenProtocolHandler::mint` |
//! | 4 | Registry-only entry | `TokenProtocolHandler::ensure_registry` |
//! | 5 | Predicted address == deployed address | both use `shared_types::derive_address` |

pub mod domain;
pub mod handler;

pub use domain::{
    normalize_tick, DeployParams, HandlerConfig, MintParams, ProtocolError, TokenInfo, TokenItem,
    MAX_TICK_LENGTH,
};
pub use handler::{TokenProtocolHandler, ONE_TOKEN_DECIMALS};
