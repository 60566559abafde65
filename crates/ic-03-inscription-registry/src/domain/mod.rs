//! # Domain Layer (Inner Hexagon)
//!
//! Inscription records, receipts, enumeration disciplines and errors.
//! No storage access and no handler calls.

pub mod entities;
pub mod enumeration;
pub mod errors;
pub mod events;

pub use entities::*;
pub use enumeration::*;
pub use errors::*;
pub use events::*;
