//! # Proof Queue
//!
//! An insertion-ordered set of inscription ids.

use crate::errors::ProofError;
use crate::ports::InscriptionReader;
use ic_03_inscription_registry::Inscription;
use serde::{Deserialize, Serialize};
use shared_types::{Address, BlockContext, Hash, InscriptionId};
use std::collections::HashSet;
use tracing::{info, warn};

/// Snapshot of one inscription's state at flush time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    pub id: InscriptionId,
    pub content_hash: Hash,
    pub content_uri_hash: Hash,
    pub origin_hash: Hash,
    pub creator: Address,
    pub current_owner: Address,
    pub previous_owner: Address,
    pub esip6: bool,
    pub sequence_number: u64,
    pub origin_block_number: u64,
    /// Local block the proof was produced in.
    pub local_block_number: u64,
    pub local_timestamp: u64,
}

impl ProofRecord {
    #[must_use]
    pub fn new(inscription: &Inscription, block: BlockContext) -> Self {
        Self {
            id: inscription.id,
            content_hash: inscription.content_hash,
            content_uri_hash: inscription.content_uri_hash,
            origin_hash: inscription.origin.hash,
            creator: inscription.creator,
            current_owner: inscription.current_owner,
            previous_owner: inscription.previous_owner,
            esip6: inscription.esip6,
            sequence_number: inscription.sequence_number,
            origin_block_number: inscription.origin.number,
            local_block_number: block.number,
            local_timestamp: block.timestamp,
        }
    }
}

/// Deduplicating queue of inscriptions awaiting proof.
#[derive(Debug, Clone)]
pub struct ProofQueue {
    flusher: Address,
    order: Vec<InscriptionId>,
    members: HashSet<InscriptionId>,
}

impl ProofQueue {
    /// Creates an empty queue drained only by `flusher`.
    #[must_use]
    pub fn new(flusher: Address) -> Self {
        Self {
            flusher,
            order: Vec::new(),
            members: HashSet::new(),
        }
    }

    /// Queues `id`; returns `false` if it was already pending.
    pub fn queue(&mut self, id: InscriptionId) -> bool {
        if !self.members.insert(id) {
            return false;
        }
        self.order.push(id);
        true
    }

    pub fn queue_all(&mut self, ids: impl IntoIterator<Item = InscriptionId>) {
        for id in ids {
            self.queue(id);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &InscriptionId) -> bool {
        self.members.contains(id)
    }

    /// Drains the queue into proofs, in queueing order.
    ///
    /// Ids unknown to `reader` are skipped. On a reader failure the queue is
    /// left intact.
    pub fn flush<R: InscriptionReader>(
        &mut self,
        caller: Address,
        block: BlockContext,
        reader: &R,
    ) -> Result<Vec<ProofRecord>, ProofError> {
        if caller != self.flusher {
            return Err(ProofError::Unauthorized { caller });
        }

        let mut proofs = Vec::with_capacity(self.order.len());
        for id in &self.order {
            match reader.read_inscription(id)? {
                Some(inscription) => proofs.push(ProofRecord::new(&inscription, block)),
                None => warn!(id = ?id, "Skipping proof for unknown inscription"),
            }
        }

        self.order.clear();
        self.members.clear();
        info!(
            block = block.number,
            proofs = proofs.len(),
            "Proof queue flushed"
        );
        Ok(proofs)
    }
}
