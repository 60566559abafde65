//! # Genesis Module
//!
//! Loads the genesis file: inscriptions that exist before live operation.
//!
//! ## Replay Sequence
//!
//! 1. Parse and validate the file (unique ids, non-null creators)
//! 2. Load each inscription through the registry's genesis path (no events)
//! 3. The first live mutation, or an explicit flush, emits the deferred
//!    events in creation order

pub mod loader;

pub use loader::{GenesisError, GenesisFile, GenesisInscription, GenesisProtocol};
