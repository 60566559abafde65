//! # Token Protocol Flow
//!
//! Deploy → mint → transfer through the registry, with shadow balances
//! following inscription ownership.
//!
//! ```text
//! create(deploy) ──→ op_deploy ──→ FixedCapacityToken at derive_address(..)
//! create(mint)   ──→ op_mint   ──→ TokenItem + mint(initial_owner)
//! transfer       ──→ on_transfer ──→ force_transfer(from, to)
//! ```

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ic_02_fixed_token::TokenError;
    use primitive_types::U256;
    use shared_types::{Bytes, Event, Hash};

    const TICK: &str = "test";

    fn whole(amount: u64) -> U256 {
        U256::from(amount) * U256::exp10(18)
    }

    /// Chain with `test` deployed (1,000,000 supply, 1,000 per mint) by ALICE.
    fn deployed_chain() -> TestChain {
        let mut chain = chain();
        let receipt = chain
            .create(ALICE, deploy(1, ALICE, TICK, "1000000", "1000"))
            .unwrap();
        assert!(matches!(
            last_event(&receipt.logs),
            Event::ProtocolHandlerSuccess { .. }
        ));
        chain
    }

    #[test]
    fn test_deploy_lands_at_predicted_address() {
        let mut chain = chain();
        let predicted = chain.predict_token_address(TICK).unwrap();

        let receipt = chain
            .create(ALICE, deploy(1, ALICE, TICK, "1000000", "1000"))
            .unwrap();

        let info = chain.token_info(TICK).unwrap().unwrap();
        assert_eq!(info.token_address, predicted);
        assert_eq!(info.deploy_inscription_id, Hash::repeat_byte(1));
        assert_eq!(info.max_supply, U256::from(1_000_000u64));
        assert_eq!(info.mint_amount, U256::from(1_000u64));
        assert_eq!(info.total_minted, U256::zero());
        assert_eq!(chain.predict_token_address("TEST").unwrap(), predicted);

        assert_eq!(
            last_event(&receipt.logs),
            &Event::ProtocolHandlerSuccess {
                id: Hash::repeat_byte(1),
                protocol: node_runtime::DEFAULT_TOKEN_PROTOCOL.to_string(),
                output: Bytes::from_slice(predicted.as_bytes()),
            }
        );

        let handler = chain.token_handler();
        let guard = handler.read();
        let token = guard.token(predicted).unwrap();
        assert_eq!(token.cap().unwrap(), whole(1_000_000));
        assert_eq!(token.decimals(), 18);
    }

    #[test]
    fn test_mint_credits_initial_owner() {
        let mut chain = deployed_chain();
        let receipt = chain.create(ALICE, mint(2, BOB, TICK, 1, "1000")).unwrap();

        assert!(receipt
            .logs
            .iter()
            .any(|log| matches!(log.event, Event::TokenMinted { .. })));
        assert_eq!(chain.token_balance(TICK, BOB).unwrap(), whole(1000));
        assert_eq!(chain.token_balance(TICK, ALICE).unwrap(), U256::zero());

        let info = chain.token_info(TICK).unwrap().unwrap();
        assert_eq!(info.total_minted, U256::from(1000u64));

        let item = chain.token_item(&Hash::repeat_byte(2)).unwrap().unwrap();
        assert_eq!(item.amount, U256::from(1000u64));
        assert_eq!(item.deploy_inscription_id, Hash::repeat_byte(1));
    }

    #[test]
    fn test_out_of_range_mint_fails_at_handler_only() {
        let mut chain = deployed_chain();
        let receipt = chain.create(ALICE, mint(2, BOB, TICK, 1001, "1000")).unwrap();

        assert!(matches!(
            last_event(&receipt.logs),
            Event::ProtocolHandlerFailed { .. }
        ));
        assert_eq!(chain.registry().owner_of(&Hash::repeat_byte(2)).unwrap(), BOB);
        assert!(chain.token_item(&Hash::repeat_byte(2)).unwrap().is_none());
        assert_eq!(chain.token_balance(TICK, BOB).unwrap(), U256::zero());
        assert_eq!(
            chain.token_info(TICK).unwrap().unwrap().total_minted,
            U256::zero()
        );
    }

    #[test]
    fn test_rejected_operations_never_revert_creation() {
        let mut chain = deployed_chain();

        let cases = [
            deploy(2, ALICE, TICK, "5000", "1000"),
            deploy(3, ALICE, "odd", "1000", "300"),
            mint(4, BOB, TICK, 1, "999"),
            mint(5, BOB, "none", 1, "1000"),
            mint(6, BOB, TICK, 0, "1000"),
        ];
        for (i, params) in cases.into_iter().enumerate() {
            let id = params.id;
            let receipt = chain.create(ALICE, params).unwrap();
            assert!(
                matches!(last_event(&receipt.logs), Event::ProtocolHandlerFailed { .. }),
                "case {i} should fail at the handler"
            );
            assert!(chain.registry().exists(&id).unwrap());
        }

        assert!(chain.token_info("odd").unwrap().is_none());
        assert_eq!(chain.tokens().unwrap().len(), 1);
        assert_eq!(chain.stats().handler_failures, 5);
    }

    #[test]
    fn test_duplicate_mint_ids_are_accepted() {
        let mut chain = deployed_chain();
        chain.create(ALICE, mint(2, BOB, TICK, 7, "1000")).unwrap();
        chain.create(ALICE, mint(3, CAROL, TICK, 7, "1000")).unwrap();

        assert_eq!(chain.token_balance(TICK, BOB).unwrap(), whole(1000));
        assert_eq!(chain.token_balance(TICK, CAROL).unwrap(), whole(1000));
        assert_eq!(
            chain.token_info(TICK).unwrap().unwrap().total_minted,
            U256::from(2000u64)
        );
    }

    #[test]
    fn test_transfer_moves_lot_balance() {
        let mut chain = deployed_chain();
        let lot = Hash::repeat_byte(2);
        chain.create(ALICE, mint(2, BOB, TICK, 1, "1000")).unwrap();

        let receipt = chain.transfer(BOB, CAROL, lot).unwrap();
        assert!(receipt
            .logs
            .iter()
            .any(|log| matches!(log.event, Event::TokenLotTransferred { .. })));
        assert_eq!(chain.token_balance(TICK, BOB).unwrap(), U256::zero());
        assert_eq!(chain.token_balance(TICK, CAROL).unwrap(), whole(1000));

        chain.transfer_batch(CAROL, ALICE, &[lot]).unwrap();
        assert_eq!(chain.token_balance(TICK, ALICE).unwrap(), whole(1000));

        let address = chain.predict_token_address(TICK).unwrap();
        let handler = chain.token_handler();
        let total = handler.read().token(address).unwrap().total_supply();
        assert_eq!(total, whole(1000));
    }

    #[test]
    fn test_transfer_without_lot_is_noop() {
        let mut chain = deployed_chain();
        let receipt = chain.transfer(ALICE, BOB, Hash::repeat_byte(1)).unwrap();

        assert!(matches!(
            last_event(&receipt.logs),
            Event::ProtocolHandlerSuccess { .. }
        ));
        assert!(!receipt
            .logs
            .iter()
            .any(|log| matches!(log.event, Event::TokenTransfer { .. })));
    }

    #[test]
    fn test_direct_token_transfer_is_disabled() {
        let mut chain = deployed_chain();
        chain.create(ALICE, mint(2, BOB, TICK, 1, "1000")).unwrap();

        let address = chain.predict_token_address(TICK).unwrap();
        let handler = chain.token_handler();
        let mut token = handler.read().token(address).unwrap().clone();

        assert_eq!(
            token.transfer(CAROL, whole(1)),
            Err(TokenError::DisabledOperation("transfer"))
        );
        assert!(token.approve(CAROL, whole(1)).is_err());
        assert!(token.transfer_from(BOB, CAROL, whole(1)).is_err());
        assert_eq!(token.balance_of(BOB), whole(1000));
    }
}
