//! # Proof Flow
//!
//! Every receipt's touched inscriptions are queued; the flusher drains one
//! proof per distinct inscription at the end of the block.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ic_05_proof_queue::{InscriptionReader, ProofError, ProofQueue};
    use node_runtime::ChainError;
    use shared_types::{BlockContext, Hash};

    #[test]
    fn test_block_proofs_reflect_final_state() {
        let mut chain = chain();
        chain.begin_block(BlockContext::new(42, 1_700_000_123));

        let mut params = inscription(1, ALICE);
        params.origin.number = 18_000_000;
        params.origin.hash = Hash::repeat_byte(0x0e);
        chain.create(ALICE, params).unwrap();
        chain.create(ALICE, inscription(2, BOB)).unwrap();
        chain.transfer(ALICE, CAROL, Hash::repeat_byte(1)).unwrap();
        assert_eq!(chain.pending_proofs(), 2);

        let proofs = chain.end_block().unwrap();
        assert_eq!(proofs.len(), 2);

        let first = &proofs[0];
        assert_eq!(first.id, Hash::repeat_byte(1));
        assert_eq!(first.current_owner, CAROL);
        assert_eq!(first.previous_owner, ALICE);
        assert_eq!(first.origin_block_number, 18_000_000);
        assert_eq!(first.origin_hash, Hash::repeat_byte(0x0e));
        assert_eq!(first.local_block_number, 42);
        assert_eq!(first.local_timestamp, 1_700_000_123);
        assert_eq!(proofs[1].sequence_number, 1);

        assert!(chain.end_block().unwrap().is_empty());
    }

    #[test]
    fn test_only_flusher_drains() {
        let mut chain = chain();
        chain.create(ALICE, inscription(1, ALICE)).unwrap();

        assert!(matches!(
            chain.flush_proofs(ALICE),
            Err(ChainError::Proof(ProofError::Unauthorized { .. }))
        ));
        let flusher = chain.config().addresses.proof_flusher;
        assert_eq!(chain.flush_proofs(flusher).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let mut chain = chain();
        chain.create(ALICE, inscription(1, ALICE)).unwrap();

        let flusher = chain.config().addresses.proof_flusher;
        let mut queue = ProofQueue::new(flusher);
        assert!(queue.queue(Hash::repeat_byte(1)));
        assert!(!queue.queue(Hash::repeat_byte(1)));
        queue.queue(Hash::repeat_byte(9));

        let registry = chain.registry();
        assert!(registry.read_inscription(&Hash::repeat_byte(9)).unwrap().is_none());
        let proofs = queue
            .flush(flusher, BlockContext::new(1, 1), registry)
            .unwrap();
        assert_eq!(proofs.len(), 1);
        assert!(queue.is_empty());
    }
}
