//! # Genesis Replay
//!
//! A genesis file is loaded before live operation; its events surface with
//! the first live call, exactly as live creation would have emitted them.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ic_03_inscription_registry::RegistryError;
    use node_runtime::{ChainError, GenesisFile, DEFAULT_TOKEN_PROTOCOL};
    use primitive_types::U256;
    use shared_types::{Event, Hash};
    use std::io::Write;

    fn hex_id(seed: u8) -> String {
        format!("0x{}", hex_bytes(seed, 32))
    }

    fn hex_address(seed: u8) -> String {
        format!("0x{}", hex_bytes(seed, 20))
    }

    fn hex_bytes(seed: u8, len: usize) -> String {
        format!("{seed:02x}").repeat(len)
    }

    fn genesis_json() -> String {
        serde_json::json!({
            "inscriptions": [
                {
                    "id": hex_id(1),
                    "creator": hex_address(0xa1),
                    "initial_owner": hex_address(0xa1),
                    "content": "data:,genesis-deploy",
                    "protocol": {
                        "name": DEFAULT_TOKEN_PROTOCOL,
                        "operation": "deploy",
                        "data": { "tick": "gen", "max_supply": "21000", "mint_amount": "1000" }
                    }
                },
                {
                    "id": hex_id(2),
                    "creator": hex_address(0xa1),
                    "initial_owner": hex_address(0xb0),
                    "content": "data:,genesis-mint",
                    "mimetype": "application/json",
                    "origin": { "hash": hex_id(0xee), "number": 17, "timestamp": 1_700_000_000u64 },
                    "protocol": {
                        "name": DEFAULT_TOKEN_PROTOCOL,
                        "operation": "mint",
                        "data": { "tick": "gen", "id": 1, "amount": 1000 }
                    }
                }
            ]
        })
        .to_string()
    }

    fn loaded_chain() -> TestChain {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(genesis_json().as_bytes()).unwrap();

        let genesis = GenesisFile::from_path(file.path()).unwrap();
        let mut chain = chain();
        assert_eq!(genesis.apply(&mut chain).unwrap(), 2);
        chain
    }

    #[test]
    fn test_genesis_state_precedes_events() {
        let chain = loaded_chain();

        assert_eq!(chain.registry().pending_genesis_count(), 2);
        assert_eq!(chain.registry().owner_of(&Hash::repeat_byte(2)).unwrap(), BOB);
        assert_eq!(
            chain.token_balance("gen", BOB).unwrap(),
            U256::from(1000u64) * U256::exp10(18)
        );

        let record = chain.registry().inscription(&Hash::repeat_byte(2)).unwrap();
        assert_eq!(record.mimetype, "application/json");
        assert_eq!(record.origin.number, 17);
    }

    #[test]
    fn test_flush_emits_binding_then_creations() {
        let mut chain = loaded_chain();
        let receipt = chain.flush_genesis().unwrap();

        assert_eq!(receipt.output, 2);
        // Binding + three creation logs per owned inscription; handler logs dropped.
        assert_eq!(receipt.logs.len(), 7);
        assert!(matches!(
            receipt.logs[0].event,
            Event::ProtocolRegistered { .. }
        ));
        assert!(receipt.logs.iter().all(|log| !matches!(
            log.event,
            Event::TokenDeployed { .. } | Event::ProtocolHandlerSuccess { .. }
        )));
        assert!(matches!(
            receipt.logs[6].event,
            Event::EthscriptionCreated { sequence_number: 1, .. }
        ));
        assert_eq!(chain.stats().genesis_replayed, 2);
    }

    #[test]
    fn test_genesis_events_match_live_creation() {
        let mut live = chain();
        let live_receipt = live
            .create(ALICE, text_inscription(Hash::repeat_byte(1), ALICE, "data:,genesis-deploy"))
            .unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!({
            "inscriptions": [{
                "id": hex_id(1),
                "creator": hex_address(0xa1),
                "initial_owner": hex_address(0xa1),
                "content": "data:,genesis-deploy"
            }]
        });
        file.write_all(json.to_string().as_bytes()).unwrap();
        let mut replayed = chain();
        GenesisFile::from_path(file.path())
            .unwrap()
            .apply(&mut replayed)
            .unwrap();

        let replay_receipt = replayed.flush_genesis().unwrap();
        assert_eq!(replay_receipt.logs, live_receipt.logs);
    }

    #[test]
    fn test_first_live_call_flushes_then_closes() {
        let mut chain = loaded_chain();
        let receipt = chain.transfer(BOB, CAROL, Hash::repeat_byte(2)).unwrap();

        assert!(matches!(
            receipt.logs[0].event,
            Event::ProtocolRegistered { .. }
        ));
        assert_eq!(chain.token_balance("gen", CAROL).unwrap(), U256::from(1000u64) * U256::exp10(18));
        assert!(matches!(
            chain.load_genesis(ALICE, inscription(9, ALICE)),
            Err(ChainError::Registry(RegistryError::GenesisClosed))
        ));

        // Both genesis ids plus the transferred one, deduplicated.
        let proofs = chain.end_block().unwrap();
        assert_eq!(proofs.len(), 2);
    }
}
