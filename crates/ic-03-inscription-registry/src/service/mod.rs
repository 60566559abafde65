//! # Inscription Registry Service
//!
//! Application service owning inscription records, the ownership index, the
//! protocol name table and the handler host.
//!
//! ## Call Discipline
//!
//! Every mutating call validates completely before touching state, then
//! commits its record writes as one atomic batch. Protocol handlers run after
//! the commit; their outcome is reported as an event and never unwinds the
//! registry call.
//!
//! Side-effect order: content store → record write → mint/transfer → events →
//! protocol dispatch.

mod queries;

use crate::dispatch::HandlerHost;
use crate::domain::{
    creation_logs, protocol_registered_log, transfer_logs, CreateParams, Enumeration, Inscription,
    ProtocolParams, Receipt, RegistryConfig, RegistryError, RegistryStats, SequentialEnumeration,
    TransferParams,
};
use ic_01_content_store::ContentStore;
use shared_types::{
    keys, operation_function, Address, BatchOperation, BlockContext, CallContext, CallOutcome,
    Event, InscriptionId, KeyValueStore, Log, SharedHandler,
};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// The inscription registry, generic over its storage and enumeration
/// discipline.
pub struct InscriptionRegistry<S: KeyValueStore, E: Enumeration = SequentialEnumeration> {
    config: RegistryConfig,
    content: ContentStore<S>,
    enumeration: E,
    host: HandlerHost,
    next_sequence: u64,
    block: BlockContext,
    genesis_pending: Vec<InscriptionId>,
    genesis_protocols: Vec<(String, Address)>,
    genesis_flushed: bool,
    stats: RegistryStats,
}

impl<S: KeyValueStore> InscriptionRegistry<S, SequentialEnumeration> {
    /// Creates an empty registry with append-only enumeration.
    pub fn new(config: RegistryConfig, content: ContentStore<S>) -> Self {
        Self::with_enumeration(config, content, SequentialEnumeration::new())
    }
}

impl<S: KeyValueStore, E: Enumeration> InscriptionRegistry<S, E> {
    pub fn with_enumeration(config: RegistryConfig, content: ContentStore<S>, enumeration: E) -> Self {
        Self {
            config,
            content,
            enumeration,
            host: HandlerHost::new(),
            next_sequence: 0,
            block: BlockContext::default(),
            genesis_pending: Vec::new(),
            genesis_protocols: Vec::new(),
            genesis_flushed: false,
            stats: RegistryStats::default(),
        }
    }

    /// Sets the local block subsequent calls execute in.
    pub fn begin_block(&mut self, block: BlockContext) {
        self.block = block;
    }

    /// Deploys a handler contract at its own address.
    pub fn attach_handler(&mut self, handler: SharedHandler) -> Address {
        self.host.attach(handler)
    }

    // =========================================================================
    // CREATION
    // =========================================================================

    /// Creates an inscription and returns its sequence number.
    pub fn create(
        &mut self,
        creator: Address,
        params: CreateParams,
    ) -> Result<Receipt<u64>, RegistryError> {
        self.validate_create(creator, &params)?;

        let mut receipt = Receipt::new(self.next_sequence);
        self.flush_pending_genesis(&mut receipt)?;

        let inscription = self.insert(creator, &params)?;
        receipt.output = inscription.sequence_number;
        receipt
            .logs
            .extend(creation_logs(self.config.address, &inscription));
        receipt.touched.push(inscription.id);

        info!(
            id = ?inscription.id,
            sequence_number = inscription.sequence_number,
            %creator,
            owner = %inscription.initial_owner,
            "Inscription created"
        );

        if let Some(protocol) = params.protocol.as_ref().filter(|p| !p.name.is_empty()) {
            self.dispatch_create(&inscription, protocol, &mut receipt.logs)?;
        }
        Ok(receipt)
    }

    /// Creates an inscription during bootstrap without emitting events.
    ///
    /// The id is queued; its creation events are emitted by the first live
    /// mutation (or [`flush_genesis`](Self::flush_genesis)). Handler events
    /// produced while loading are dropped.
    pub fn load_genesis(
        &mut self,
        creator: Address,
        params: CreateParams,
    ) -> Result<u64, RegistryError> {
        if self.genesis_flushed {
            return Err(RegistryError::GenesisClosed);
        }
        self.validate_create(creator, &params)?;

        let inscription = self.insert(creator, &params)?;
        if let Some(protocol) = params.protocol.as_ref().filter(|p| !p.name.is_empty()) {
            let mut discarded = Vec::new();
            self.dispatch_create(&inscription, protocol, &mut discarded)?;
        }
        self.genesis_pending.push(inscription.id);

        debug!(
            id = ?inscription.id,
            sequence_number = inscription.sequence_number,
            "Genesis inscription loaded"
        );
        Ok(inscription.sequence_number)
    }

    /// Emits creation events for all pending genesis inscriptions and closes
    /// genesis loading. Returns the number replayed; zero once closed.
    pub fn flush_genesis(&mut self) -> Result<Receipt<usize>, RegistryError> {
        let mut receipt = Receipt::new(0);
        let count = self.flush_pending_genesis(&mut receipt)?;
        receipt.output = count;
        Ok(receipt)
    }

    // =========================================================================
    // TRANSFER
    // =========================================================================

    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        id: InscriptionId,
    ) -> Result<Receipt, RegistryError> {
        self.transfer_checked(from, to, id, None)
    }

    /// Transfers only if the recorded previous owner equals `expected_previous_owner`.
    pub fn transfer_with_previous_owner_check(
        &mut self,
        from: Address,
        to: Address,
        id: InscriptionId,
        expected_previous_owner: Address,
    ) -> Result<Receipt, RegistryError> {
        self.transfer_checked(from, to, id, Some(expected_previous_owner))
    }

    /// Applies a transfer intent from the import pipeline.
    pub fn apply_transfer(
        &mut self,
        from: Address,
        params: TransferParams,
    ) -> Result<Receipt, RegistryError> {
        self.transfer_checked(from, params.to, params.id, params.expected_previous_owner)
    }

    /// Transfers every listed inscription `from` owns, skipping the rest.
    /// Returns the number transferred.
    pub fn transfer_batch(
        &mut self,
        from: Address,
        to: Address,
        ids: &[InscriptionId],
    ) -> Result<Receipt<u64>, RegistryError> {
        if from.is_zero() {
            return Err(RegistryError::InvalidSender);
        }
        let mut any_owned = false;
        for id in ids {
            if self.owned_by(id, from)?.is_some() {
                any_owned = true;
                break;
            }
        }
        if !any_owned {
            return Err(RegistryError::NothingTransferred);
        }

        let mut receipt = Receipt::new(0);
        self.flush_pending_genesis(&mut receipt)?;

        let mut moved = HashSet::new();
        for id in ids {
            if !moved.insert(*id) {
                debug!(id = ?id, "Batch transfer skipped repeated inscription");
                continue;
            }
            match self.owned_by(id, from)? {
                Some(inscription) => {
                    self.move_token(inscription, to, &mut receipt)?;
                    receipt.output += 1;
                }
                None => debug!(id = ?id, %from, "Batch transfer skipped inscription"),
            }
        }
        Ok(receipt)
    }

    // =========================================================================
    // PROTOCOL REGISTRATION
    // =========================================================================

    /// Binds `name` to `handler`. Bindings are permanent.
    pub fn register_protocol(
        &mut self,
        caller: Address,
        name: &str,
        handler: Address,
    ) -> Result<Receipt, RegistryError> {
        self.validate_registration(caller, name, handler)?;

        let mut receipt = Receipt::new(());
        self.flush_pending_genesis(&mut receipt)?;

        self.bind_protocol(name, handler)?;
        receipt
            .logs
            .push(protocol_registered_log(self.config.address, name, handler));
        Ok(receipt)
    }

    /// Binds a protocol during bootstrap. The `ProtocolRegistered` event is
    /// emitted with the genesis replay, ahead of the creation events.
    pub fn register_genesis_protocol(
        &mut self,
        caller: Address,
        name: &str,
        handler: Address,
    ) -> Result<(), RegistryError> {
        if self.genesis_flushed {
            return Err(RegistryError::GenesisClosed);
        }
        self.validate_registration(caller, name, handler)?;
        self.bind_protocol(name, handler)?;
        self.genesis_protocols.push((name.to_string(), handler));
        Ok(())
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn validate_create(&self, creator: Address, params: &CreateParams) -> Result<(), RegistryError> {
        if creator.is_zero() {
            return Err(RegistryError::InvalidCreator);
        }
        if self.exists(&params.id)? {
            return Err(RegistryError::AlreadyExists { id: params.id });
        }
        if !params.esip6 && self.content_uri_seen(&params.content_uri_hash)? {
            return Err(RegistryError::DuplicateContentUri {
                content_uri_hash: params.content_uri_hash,
            });
        }
        Ok(())
    }

    fn validate_registration(
        &self,
        caller: Address,
        name: &str,
        handler: Address,
    ) -> Result<(), RegistryError> {
        if caller != self.config.protocol_admin {
            return Err(RegistryError::Unauthorized { caller });
        }
        if name.is_empty() {
            return Err(RegistryError::InvalidProtocolName);
        }
        if handler.is_zero() {
            return Err(RegistryError::InvalidHandler);
        }
        if self.handler_for(name)?.is_some() {
            return Err(RegistryError::AlreadyRegistered {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn bind_protocol(&mut self, name: &str, handler: Address) -> Result<(), RegistryError> {
        self.content
            .kv_mut()
            .put(&keys::protocol(name), handler.as_bytes())?;
        info!(protocol = name, %handler, "Protocol registered");
        Ok(())
    }

    /// Writes content and record in one batch, then mints the token.
    fn insert(&mut self, creator: Address, params: &CreateParams) -> Result<Inscription, RegistryError> {
        let sequence_number = self.next_sequence;
        let prepared = self.content.prepare(params.content.as_slice())?;

        let inscription = Inscription {
            id: params.id,
            content_hash: prepared.content_hash,
            content_uri_hash: params.content_uri_hash,
            origin: params.origin,
            creator,
            initial_owner: params.initial_owner,
            current_owner: params.initial_owner,
            previous_owner: creator,
            mimetype: params.mimetype.clone(),
            sequence_number,
            esip6: params.esip6,
            protocol: params.protocol_name().unwrap_or_default().to_string(),
            created_at: self.block,
        };

        let mut operations = prepared.operations;
        operations.push(BatchOperation::put(
            keys::inscription(&inscription.id),
            bincode::serialize(&inscription)?,
        ));
        operations.push(BatchOperation::put(
            keys::sequence_to_id(sequence_number),
            inscription.id.as_bytes().to_vec(),
        ));
        if !self.content_uri_seen(&inscription.content_uri_hash)? {
            operations.push(BatchOperation::put(
                keys::content_uri(&inscription.content_uri_hash),
                sequence_number.to_be_bytes().to_vec(),
            ));
        }
        self.content.kv_mut().atomic_batch_write(operations)?;
        self.next_sequence += 1;

        if inscription.initial_owner.is_zero() {
            self.enumeration.on_mint(creator, sequence_number)?;
            self.enumeration.on_burn(creator, sequence_number)?;
        } else {
            self.enumeration
                .on_mint(inscription.initial_owner, sequence_number)?;
        }
        self.stats.created += 1;
        Ok(inscription)
    }

    fn transfer_checked(
        &mut self,
        from: Address,
        to: Address,
        id: InscriptionId,
        expected_previous_owner: Option<Address>,
    ) -> Result<Receipt, RegistryError> {
        if from.is_zero() {
            return Err(RegistryError::InvalidSender);
        }
        let inscription = self.inscription(&id)?;
        if inscription.current_owner != from {
            return Err(RegistryError::NotOwner {
                id,
                caller: from,
                owner: inscription.current_owner,
            });
        }
        if let Some(expected) = expected_previous_owner {
            if expected != inscription.previous_owner {
                return Err(RegistryError::PreviousOwnerMismatch {
                    id,
                    expected,
                    actual: inscription.previous_owner,
                });
            }
        }

        let mut receipt = Receipt::new(());
        self.flush_pending_genesis(&mut receipt)?;
        self.move_token(inscription, to, &mut receipt)?;
        Ok(receipt)
    }

    fn owned_by(
        &self,
        id: &InscriptionId,
        owner: Address,
    ) -> Result<Option<Inscription>, RegistryError> {
        Ok(self
            .find(id)?
            .filter(|inscription| inscription.current_owner == owner))
    }

    fn move_token<T>(
        &mut self,
        mut inscription: Inscription,
        to: Address,
        receipt: &mut Receipt<T>,
    ) -> Result<(), RegistryError> {
        let from = inscription.current_owner;
        inscription.previous_owner = from;
        inscription.current_owner = to;

        self.content.kv_mut().put(
            &keys::inscription(&inscription.id),
            &bincode::serialize(&inscription)?,
        )?;
        if to.is_zero() {
            self.enumeration.on_burn(from, inscription.sequence_number)?;
        } else {
            self.enumeration
                .on_transfer(from, to, inscription.sequence_number)?;
        }
        self.stats.transferred += 1;

        receipt
            .logs
            .extend(transfer_logs(self.config.address, &inscription, from, to));
        receipt.touched.push(inscription.id);
        debug!(id = ?inscription.id, %from, %to, "Inscription transferred");

        if inscription.has_protocol() {
            self.dispatch_transfer(&inscription, from, to, &mut receipt.logs)?;
        }
        Ok(())
    }

    /// Emits queued genesis creation events into `receipt` on first use.
    fn flush_pending_genesis<T>(&mut self, receipt: &mut Receipt<T>) -> Result<usize, RegistryError> {
        if self.genesis_flushed {
            return Ok(0);
        }

        let mut logs: Vec<Log> = self
            .genesis_protocols
            .iter()
            .map(|(name, handler)| protocol_registered_log(self.config.address, name, *handler))
            .collect();
        for id in &self.genesis_pending {
            logs.extend(creation_logs(self.config.address, &self.inscription(id)?));
        }

        let pending = std::mem::take(&mut self.genesis_pending);
        self.genesis_protocols.clear();
        let count = pending.len();
        receipt.logs.extend(logs);
        receipt.touched.extend(pending);
        self.genesis_flushed = true;
        self.stats.genesis_replayed += count as u64;

        info!(count, "Genesis events replayed");
        Ok(count)
    }

    fn call_context(&self, inscription: &Inscription) -> CallContext {
        CallContext {
            caller: self.config.address,
            inscription: inscription.snapshot(),
            block: self.block,
        }
    }

    fn dispatch_create(
        &mut self,
        inscription: &Inscription,
        protocol: &ProtocolParams,
        logs: &mut Vec<Log>,
    ) -> Result<(), RegistryError> {
        let Some(handler) = self.handler_for(&protocol.name)? else {
            debug!(protocol = %protocol.name, "No handler registered; skipping dispatch");
            return Ok(());
        };

        let ctx = self.call_context(inscription);
        let outcome = self.host.call(
            handler,
            &ctx,
            &operation_function(&protocol.operation),
            protocol.data.as_slice(),
        );
        self.record_outcome(inscription.id, &protocol.name, outcome, logs);
        Ok(())
    }

    fn dispatch_transfer(
        &mut self,
        inscription: &Inscription,
        from: Address,
        to: Address,
        logs: &mut Vec<Log>,
    ) -> Result<(), RegistryError> {
        let Some(handler) = self.handler_for(&inscription.protocol)? else {
            return Ok(());
        };

        let ctx = self.call_context(inscription);
        let outcome = self.host.notify_transfer(handler, &ctx, from, to);
        self.record_outcome(inscription.id, &inscription.protocol, outcome, logs);
        Ok(())
    }

    fn record_outcome(
        &mut self,
        id: InscriptionId,
        protocol: &str,
        outcome: CallOutcome,
        logs: &mut Vec<Log>,
    ) {
        let event = match outcome {
            CallOutcome::Success {
                output,
                logs: handler_logs,
            } => {
                self.stats.handler_successes += 1;
                logs.extend(handler_logs);
                Event::ProtocolHandlerSuccess {
                    id,
                    protocol: protocol.to_string(),
                    output,
                }
            }
            CallOutcome::Failure { reason } => {
                self.stats.handler_failures += 1;
                warn!(
                    id = ?id,
                    protocol,
                    reason = %String::from_utf8_lossy(reason.as_slice()),
                    "Protocol handler failed"
                );
                Event::ProtocolHandlerFailed {
                    id,
                    protocol: protocol.to_string(),
                    reason,
                }
            }
        };
        logs.push(Log::new(self.config.address, event));
    }
}
