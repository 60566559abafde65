//! # IC-02 Fixed-Capacity Token
//!
//! An ERC-20-shaped balance sheet whose every movement is driven by a single
//! controller (the token protocol handler). Holders cannot move balances
//! themselves: `transfer`, `transfer_from` and `approve` always fail, so a
//! balance only ever follows ownership of the inscription that carries it.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | 1 | Single controller | `FixedCapacityToken::ensure_controller` |
//! | 2 | Capped supply | `mint` rejects `total_supply + amount > cap` |
//! | 3 | One-time setup | `initialize` rejects a second call |
//! | 4 | Conservation | `force_transfer` never changes `total_supply` |

pub mod errors;
pub mod token;

pub use errors::TokenError;
pub use token::{FixedCapacityToken, TokenMetadata, DECIMALS};
