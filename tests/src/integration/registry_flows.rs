//! # Registry Flows
//!
//! Creation, content dedup, transfers and enumeration through the runtime.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ic_03_inscription_registry::{RegistryError, TransferParams};
    use node_runtime::ChainError;
    use shared_types::{Address, Event, Hash, KeyValueStore};

    fn kv_len(chain: &TestChain) -> usize {
        chain.registry().content_store().kv().prefix_scan(b"").unwrap().len()
    }

    // =========================================================================
    // CREATION
    // =========================================================================

    #[test]
    fn test_sequence_numbers_follow_creation_order() {
        let mut chain = chain();
        for seed in 1..=5u8 {
            let receipt = chain.create(ALICE, inscription(seed, BOB)).unwrap();
            assert_eq!(receipt.output, u64::from(seed - 1));
        }

        let registry = chain.registry();
        assert_eq!(registry.total_supply(), 5);
        for index in 0..5u64 {
            let token = registry.token_by_index(index).unwrap();
            assert_eq!(token, index);
            let id = registry.id_by_sequence_number(token).unwrap();
            assert_eq!(id, Hash::repeat_byte(index as u8 + 1));
            assert_eq!(registry.sequence_number_of(&id).unwrap(), index);
        }
        assert_eq!(registry.balance_of(BOB), 5);
        assert_eq!(registry.token_of_owner_by_index(BOB, 4).unwrap(), 4);
    }

    #[test]
    fn test_duplicate_id_leaves_state_unchanged() {
        let mut chain = chain();
        chain.create(ALICE, inscription(1, BOB)).unwrap();
        let keys_before = kv_len(&chain);

        let mut again = inscription(1, CAROL);
        again.content_uri_hash = Hash::repeat_byte(0x99);
        let result = chain.create(ALICE, again);

        assert!(matches!(
            result,
            Err(ChainError::Registry(RegistryError::AlreadyExists { .. }))
        ));
        assert_eq!(kv_len(&chain), keys_before);
        assert_eq!(chain.registry().total_supply(), 1);
        assert_eq!(chain.registry().owner_of(&Hash::repeat_byte(1)).unwrap(), BOB);
    }

    #[test]
    fn test_duplicate_uri_requires_esip6() {
        let mut chain = chain();
        chain
            .create(ALICE, text_inscription(Hash::repeat_byte(1), BOB, "data:,same"))
            .unwrap();

        let duplicate = text_inscription(Hash::repeat_byte(2), BOB, "data:,same");
        assert!(matches!(
            chain.create(ALICE, duplicate.clone()),
            Err(ChainError::Registry(RegistryError::DuplicateContentUri { .. }))
        ));

        let keys_before = kv_len(&chain);
        let mut esip6 = duplicate;
        esip6.esip6 = true;
        chain.create(ALICE, esip6).unwrap();

        // Record and sequence index only; content and URI marker already exist.
        assert_eq!(kv_len(&chain), keys_before + 2);
        let registry = chain.registry();
        assert_eq!(
            registry.inscription(&Hash::repeat_byte(1)).unwrap().content_hash,
            registry.inscription(&Hash::repeat_byte(2)).unwrap().content_hash
        );
        assert_eq!(registry.content_of(&Hash::repeat_byte(2)).unwrap(), b"data:,same");
    }

    #[test]
    fn test_large_and_empty_content_round_trip() {
        let mut chain = chain();
        let large: String = std::iter::repeat("0123456789abcdef").take(4_000).collect();
        chain
            .create(ALICE, text_inscription(Hash::repeat_byte(1), ALICE, &large))
            .unwrap();
        chain
            .create(ALICE, text_inscription(Hash::repeat_byte(2), ALICE, ""))
            .unwrap();

        let registry = chain.registry();
        assert_eq!(registry.content_of(&Hash::repeat_byte(1)).unwrap(), large.as_bytes());
        assert!(registry.content_of(&Hash::repeat_byte(2)).unwrap().is_empty());
    }

    #[test]
    fn test_null_initial_owner_burns_on_creation() {
        let mut chain = chain();
        chain.flush_genesis().unwrap();
        let receipt = chain.create(ALICE, inscription(1, Address::ZERO)).unwrap();

        assert_eq!(receipt.logs.len(), 4);
        assert_eq!(
            receipt.logs[1].event,
            Event::Transfer {
                from: ALICE,
                to: Address::ZERO,
                token_id: 0
            }
        );
        assert_eq!(chain.registry().owner_of(&Hash::repeat_byte(1)).unwrap(), Address::ZERO);
        assert_eq!(chain.registry().balance_of(ALICE), 0);
    }

    // =========================================================================
    // TRANSFERS
    // =========================================================================

    #[test]
    fn test_transfer_unknown_id_fails() {
        let mut chain = chain();
        assert!(matches!(
            chain.transfer(ALICE, BOB, Hash::repeat_byte(9)),
            Err(ChainError::Registry(RegistryError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_previous_owner_check_fails_only_on_mismatch() {
        let mut chain = chain();
        let id = Hash::repeat_byte(1);
        chain.create(ALICE, inscription(1, BOB)).unwrap();

        assert!(matches!(
            chain.transfer_with_previous_owner_check(BOB, CAROL, id, BOB),
            Err(ChainError::Registry(RegistryError::PreviousOwnerMismatch { .. }))
        ));
        chain
            .transfer_with_previous_owner_check(BOB, CAROL, id, ALICE)
            .unwrap();

        chain
            .apply_transfer(
                CAROL,
                TransferParams {
                    to: ALICE,
                    id,
                    expected_previous_owner: Some(BOB),
                },
            )
            .unwrap();
        let record = chain.registry().inscription(&id).unwrap();
        assert_eq!(record.current_owner, ALICE);
        assert_eq!(record.previous_owner, CAROL);
    }

    #[test]
    fn test_batch_transfer_counts_owned_only() {
        let mut chain = chain();
        chain.create(ALICE, inscription(1, ALICE)).unwrap();
        chain.create(ALICE, inscription(2, BOB)).unwrap();

        let receipt = chain
            .transfer_batch(ALICE, CAROL, &[Hash::repeat_byte(1), Hash::repeat_byte(2)])
            .unwrap();
        assert_eq!(receipt.output, 1);

        assert!(matches!(
            chain.transfer_batch(ALICE, CAROL, &[Hash::repeat_byte(2)]),
            Err(ChainError::Registry(RegistryError::NothingTransferred))
        ));
        assert_eq!(chain.registry().balance_of(CAROL), 1);
        assert_eq!(chain.stats().transferred, 1);
    }
}
