//! # Inscription Chain
//!
//! The runtime facade. Owns the registry (with its content store), the token
//! protocol handler and the proof queue, and routes import intents through
//! them block by block.
//!
//! ## Block Lifecycle
//!
//! 1. `begin_block` sets the local block every call executes in
//! 2. `create` / `transfer*` apply intents; each receipt's touched ids are queued
//! 3. `end_block` flushes the proof queue as the configured flusher

use crate::container::config::ChainConfig;
use crate::container::ChainError;
use ic_01_content_store::ContentStore;
use ic_03_inscription_registry::{
    CreateParams, InscriptionRegistry, Receipt, RegistryConfig, RegistryStats, TransferParams,
};
use ic_04_token_protocol::{HandlerConfig, TokenInfo, TokenItem, TokenProtocolHandler};
use ic_05_proof_queue::{ProofQueue, ProofRecord};
use parking_lot::RwLock;
use primitive_types::U256;
use shared_types::{Address, BlockContext, InMemoryKVStore, InscriptionId, KeyValueStore};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Registry, token protocol handler and proof queue wired from one
/// [`ChainConfig`].
pub struct InscriptionChain<S: KeyValueStore + 'static> {
    config: ChainConfig,
    registry: InscriptionRegistry<S>,
    tokens: Arc<RwLock<TokenProtocolHandler<S>>>,
    proofs: ProofQueue,
    block: BlockContext,
}

impl InscriptionChain<InMemoryKVStore> {
    /// A chain over fresh in-memory stores.
    pub fn in_memory(config: ChainConfig) -> Result<Self, ChainError> {
        Self::new(config, InMemoryKVStore::new(), InMemoryKVStore::new())
    }
}

impl<S: KeyValueStore + 'static> InscriptionChain<S> {
    /// Wires the components and binds the token protocol.
    ///
    /// The protocol binding is a genesis registration: its event is emitted
    /// with the genesis replay, so genesis inscriptions can still be loaded.
    #[instrument(name = "chain_init", skip_all)]
    pub fn new(config: ChainConfig, registry_kv: S, handler_kv: S) -> Result<Self, ChainError> {
        config.validate()?;
        let addresses = config.addresses;

        let content = ContentStore::new(registry_kv, config.content.clone())?;
        let mut registry = InscriptionRegistry::new(
            RegistryConfig {
                address: addresses.registry,
                protocol_admin: addresses.protocol_admin,
            },
            content,
        );

        let tokens = Arc::new(RwLock::new(TokenProtocolHandler::new(
            HandlerConfig {
                address: addresses.token_handler,
                registry: addresses.registry,
                token_template: addresses.token_template,
                protocol_name: config.token_protocol.protocol_name.clone(),
            },
            handler_kv,
        )));
        let handler = registry.attach_handler(tokens.clone());
        registry.register_genesis_protocol(
            addresses.protocol_admin,
            &config.token_protocol.protocol_name,
            handler,
        )?;

        info!(
            registry = %addresses.registry,
            token_handler = %handler,
            protocol = %config.token_protocol.protocol_name,
            "Inscription chain initialized"
        );

        Ok(Self {
            proofs: ProofQueue::new(addresses.proof_flusher),
            config,
            registry,
            tokens,
            block: BlockContext::default(),
        })
    }

    // =========================================================================
    // BLOCK LIFECYCLE
    // =========================================================================

    pub fn begin_block(&mut self, block: BlockContext) {
        debug!(number = block.number, timestamp = block.timestamp, "Block started");
        self.block = block;
        self.registry.begin_block(block);
    }

    /// Flushes pending proofs for the current block.
    pub fn end_block(&mut self) -> Result<Vec<ProofRecord>, ChainError> {
        self.flush_proofs(self.config.addresses.proof_flusher)
    }

    /// Flushes pending proofs on behalf of `caller`.
    #[instrument(skip(self), fields(block = self.block.number))]
    pub fn flush_proofs(&mut self, caller: Address) -> Result<Vec<ProofRecord>, ChainError> {
        Ok(self.proofs.flush(caller, self.block, &self.registry)?)
    }

    // =========================================================================
    // GENESIS
    // =========================================================================

    /// Loads one genesis inscription. Events are deferred to the replay.
    pub fn load_genesis(&mut self, creator: Address, params: CreateParams) -> Result<u64, ChainError> {
        Ok(self.registry.load_genesis(creator, params)?)
    }

    /// Closes genesis, emitting the deferred events.
    #[instrument(skip(self))]
    pub fn flush_genesis(&mut self) -> Result<Receipt<usize>, ChainError> {
        let receipt = self.registry.flush_genesis()?;
        self.track(&receipt.touched);
        Ok(receipt)
    }

    // =========================================================================
    // INTENTS
    // =========================================================================

    #[instrument(skip(self, params), fields(id = ?params.id))]
    pub fn create(&mut self, creator: Address, params: CreateParams) -> Result<Receipt<u64>, ChainError> {
        let receipt = self.registry.create(creator, params)?;
        self.track(&receipt.touched);
        Ok(receipt)
    }

    #[instrument(skip(self))]
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        id: InscriptionId,
    ) -> Result<Receipt, ChainError> {
        let receipt = self.registry.transfer(from, to, id)?;
        self.track(&receipt.touched);
        Ok(receipt)
    }

    #[instrument(skip(self))]
    pub fn transfer_with_previous_owner_check(
        &mut self,
        from: Address,
        to: Address,
        id: InscriptionId,
        expected_previous_owner: Address,
    ) -> Result<Receipt, ChainError> {
        let receipt = self.registry.transfer_with_previous_owner_check(
            from,
            to,
            id,
            expected_previous_owner,
        )?;
        self.track(&receipt.touched);
        Ok(receipt)
    }

    #[instrument(skip(self, params), fields(id = ?params.id))]
    pub fn apply_transfer(&mut self, from: Address, params: TransferParams) -> Result<Receipt, ChainError> {
        let receipt = self.registry.apply_transfer(from, params)?;
        self.track(&receipt.touched);
        Ok(receipt)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub fn transfer_batch(
        &mut self,
        from: Address,
        to: Address,
        ids: &[InscriptionId],
    ) -> Result<Receipt<u64>, ChainError> {
        let receipt = self.registry.transfer_batch(from, to, ids)?;
        self.track(&receipt.touched);
        Ok(receipt)
    }

    /// Binds a further protocol; `caller` must be the protocol admin.
    pub fn register_protocol(
        &mut self,
        caller: Address,
        name: &str,
        handler: Address,
    ) -> Result<Receipt, ChainError> {
        let receipt = self.registry.register_protocol(caller, name, handler)?;
        self.track(&receipt.touched);
        Ok(receipt)
    }

    fn track(&mut self, touched: &[InscriptionId]) {
        self.proofs.queue_all(touched.iter().copied());
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    #[must_use]
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    #[must_use]
    pub fn block(&self) -> BlockContext {
        self.block
    }

    #[must_use]
    pub fn registry(&self) -> &InscriptionRegistry<S> {
        &self.registry
    }

    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        self.registry.stats()
    }

    /// Number of distinct inscriptions awaiting proof.
    #[must_use]
    pub fn pending_proofs(&self) -> usize {
        self.proofs.len()
    }

    pub fn token_info(&self, tick: &str) -> Result<Option<TokenInfo>, ChainError> {
        Ok(self.tokens.read().token_info(tick)?)
    }

    pub fn token_item(&self, id: &InscriptionId) -> Result<Option<TokenItem>, ChainError> {
        Ok(self.tokens.read().token_item(id)?)
    }

    /// Base-unit balance of `owner` in the token for `tick`.
    pub fn token_balance(&self, tick: &str, owner: Address) -> Result<U256, ChainError> {
        Ok(self.tokens.read().balance_of(tick, owner)?)
    }

    pub fn predict_token_address(&self, tick: &str) -> Result<Address, ChainError> {
        Ok(self.tokens.read().predict_token_address(tick)?)
    }

    pub fn tokens(&self) -> Result<Vec<TokenInfo>, ChainError> {
        Ok(self.tokens.read().tokens()?)
    }

    /// Shared handle to the token protocol handler.
    #[must_use]
    pub fn token_handler(&self) -> Arc<RwLock<TokenProtocolHandler<S>>> {
        Arc::clone(&self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::config::DEFAULT_TOKEN_PROTOCOL as DEFAULT_PROTOCOL;
    use shared_types::{sha256, Bytes, Event, Hash};

    const ALICE: Address = Address::repeat_byte(0xa1);
    const BOB: Address = Address::repeat_byte(0xb0);

    fn params(seed: u8, owner: Address) -> CreateParams {
        let content = format!("data:,{seed}");
        CreateParams {
            id: Hash::repeat_byte(seed),
            content_uri_hash: sha256(content.as_bytes()),
            initial_owner: owner,
            content: Bytes::from(content.as_str()),
            mimetype: "text/plain".to_string(),
            esip6: false,
            protocol: None,
            origin: Default::default(),
        }
    }

    #[test]
    fn test_init_binds_token_protocol() {
        let chain = InscriptionChain::in_memory(ChainConfig::default()).unwrap();
        let addresses = chain.config().addresses;
        assert_eq!(
            chain.registry().handler_for(DEFAULT_PROTOCOL).unwrap(),
            Some(addresses.token_handler)
        );
        assert!(!chain.registry().is_genesis_flushed());
    }

    #[test]
    fn test_init_rejects_invalid_config() {
        let mut config = ChainConfig::default();
        config.addresses.registry = Address::ZERO;
        assert!(matches!(
            InscriptionChain::in_memory(config),
            Err(ChainError::Config(_))
        ));
    }

    #[test]
    fn test_first_create_replays_protocol_binding() {
        let mut chain = InscriptionChain::in_memory(ChainConfig::default()).unwrap();
        let receipt = chain.create(ALICE, params(1, BOB)).unwrap();

        assert_eq!(
            receipt.logs[0].event,
            Event::ProtocolRegistered {
                name: DEFAULT_PROTOCOL.to_string(),
                handler: chain.config().addresses.token_handler,
            }
        );
        assert_eq!(receipt.logs.len(), 4);
    }

    #[test]
    fn test_end_block_drains_touched_once() {
        let mut chain = InscriptionChain::in_memory(ChainConfig::default()).unwrap();
        chain.begin_block(BlockContext::new(7, 1_700_000_000));
        chain.create(ALICE, params(1, ALICE)).unwrap();
        chain.transfer(ALICE, BOB, Hash::repeat_byte(1)).unwrap();
        assert_eq!(chain.pending_proofs(), 1);

        let proofs = chain.end_block().unwrap();
        assert_eq!(proofs.len(), 1);
        assert_eq!(proofs[0].current_owner, BOB);
        assert_eq!(proofs[0].previous_owner, ALICE);
        assert_eq!(proofs[0].local_block_number, 7);
        assert_eq!(chain.pending_proofs(), 0);
    }

    #[test]
    fn test_flush_proofs_requires_flusher() {
        let mut chain = InscriptionChain::in_memory(ChainConfig::default()).unwrap();
        chain.create(ALICE, params(1, ALICE)).unwrap();
        assert!(matches!(
            chain.flush_proofs(ALICE),
            Err(ChainError::Proof(_))
        ));
        assert_eq!(chain.pending_proofs(), 1);
    }
}
