//! # IC-05 Proof Queue
//!
//! Collects the ids of inscriptions touched during a block and, on a
//! privileged flush, emits one [`ProofRecord`] per distinct id describing its
//! current state. Queueing is idempotent; flushing drains the queue.

pub mod errors;
pub mod ports;
pub mod queue;

pub use errors::ProofError;
pub use ports::InscriptionReader;
pub use queue::{ProofQueue, ProofRecord};
