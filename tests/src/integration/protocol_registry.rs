//! # Protocol Registry
//!
//! Binding rules for protocol names, exercised through the runtime facade.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ic_03_inscription_registry::{ProtocolParams, RegistryError};
    use node_runtime::{ChainError, DEFAULT_TOKEN_PROTOCOL};
    use shared_types::{Address, Bytes, Event, Hash};

    #[test]
    fn test_token_protocol_cannot_be_rebound() {
        let mut chain = chain();
        let admin = chain.config().addresses.protocol_admin;
        let result = chain.register_protocol(admin, DEFAULT_TOKEN_PROTOCOL, Address::repeat_byte(0x77));

        assert!(matches!(
            result,
            Err(ChainError::Registry(RegistryError::AlreadyRegistered { .. }))
        ));
        assert!(!chain.registry().is_genesis_flushed());
    }

    #[test]
    fn test_second_name_for_same_handler() {
        let mut chain = chain();
        let addresses = chain.config().addresses;

        let receipt = chain
            .register_protocol(addresses.protocol_admin, "alias", addresses.token_handler)
            .unwrap();

        // Genesis binding replayed ahead of the new one.
        assert_eq!(receipt.logs.len(), 2);
        assert_eq!(
            receipt.logs[1].event,
            Event::ProtocolRegistered {
                name: "alias".to_string(),
                handler: addresses.token_handler,
            }
        );
        assert_eq!(
            chain.registry().handler_for("alias").unwrap(),
            Some(addresses.token_handler)
        );
    }

    #[test]
    fn test_registration_is_admin_only() {
        let mut chain = chain();
        assert!(matches!(
            chain.register_protocol(ALICE, "mine", Address::repeat_byte(0x77)),
            Err(ChainError::Registry(RegistryError::Unauthorized { .. }))
        ));
    }

    #[test]
    fn test_bound_but_undeployed_handler_reports_failure() {
        let mut chain = chain();
        let admin = chain.config().addresses.protocol_admin;
        chain
            .register_protocol(admin, "ghost", Address::repeat_byte(0x77))
            .unwrap();

        let mut params = inscription(1, BOB);
        params.protocol = Some(ProtocolParams {
            name: "ghost".to_string(),
            operation: "deploy".to_string(),
            data: Bytes::from("{}"),
        });
        let receipt = chain.create(ALICE, params).unwrap();

        assert!(matches!(
            last_event(&receipt.logs),
            Event::ProtocolHandlerFailed { protocol, .. } if protocol == "ghost"
        ));
        assert_eq!(chain.registry().owner_of(&Hash::repeat_byte(1)).unwrap(), BOB);
        assert_eq!(chain.stats().handler_failures, 1);
    }
}
