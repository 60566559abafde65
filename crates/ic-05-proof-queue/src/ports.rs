//! # Driven Ports
//!
//! The proof queue reads inscription state through [`InscriptionReader`]; the
//! registry implements it directly.

use crate::errors::ProofError;
use ic_03_inscription_registry::{Enumeration, Inscription, InscriptionRegistry};
use shared_types::{InscriptionId, KeyValueStore};

/// Read access to inscription records.
pub trait InscriptionReader {
    /// The record for `id`, or `None` if no such inscription exists.
    fn read_inscription(&self, id: &InscriptionId) -> Result<Option<Inscription>, ProofError>;
}

impl<S: KeyValueStore, E: Enumeration> InscriptionReader for InscriptionRegistry<S, E> {
    fn read_inscription(&self, id: &InscriptionId) -> Result<Option<Inscription>, ProofError> {
        self.find(id).map_err(|e| ProofError::Source(e.to_string()))
    }
}
