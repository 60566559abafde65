//! # Shared Types Crate
//!
//! Domain primitives and contracts shared by every Inscription-Chain crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `Hash`, `U256`, `Bytes` and the
//!   event log format are defined once, here.
//! - **Pure Derivation**: hashing and deterministic address derivation are
//!   side-effect free so prediction and deployment can never diverge.
//! - **Isolated Calls**: cross-contract calls return a [`CallOutcome`], never an
//!   `Err` that could unwind the caller.

pub mod crypto;
pub mod dispatch;
pub mod entities;
pub mod errors;
pub mod events;
pub mod storage;

pub use crypto::*;
pub use dispatch::*;
pub use entities::*;
pub use errors::*;
pub use events::*;
pub use storage::*;
