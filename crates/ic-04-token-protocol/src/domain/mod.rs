//! # Domain Layer
//!
//! Payload decoding, persisted token records and errors.

pub mod entities;
pub mod errors;
pub mod params;

pub use entities::*;
pub use errors::*;
pub use params::*;
