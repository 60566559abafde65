//! Read-only registry queries.

use super::InscriptionRegistry;
use crate::domain::{Enumeration, Inscription, RegistryConfig, RegistryError, RegistryStats};
use ic_01_content_store::ContentStore;
use shared_types::{keys, Address, BlockContext, Hash, InscriptionId, KeyValueStore};

impl<S: KeyValueStore, E: Enumeration> InscriptionRegistry<S, E> {
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.config.address
    }

    #[must_use]
    pub fn block(&self) -> BlockContext {
        self.block
    }

    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        self.stats
    }

    pub fn content_store(&self) -> &ContentStore<S> {
        &self.content
    }

    pub fn exists(&self, id: &InscriptionId) -> Result<bool, RegistryError> {
        Ok(self.content.kv().exists(&keys::inscription(id))?)
    }

    /// The stored record, if any.
    pub fn find(&self, id: &InscriptionId) -> Result<Option<Inscription>, RegistryError> {
        match self.content.kv().get(&keys::inscription(id))? {
            Some(raw) => Ok(Some(bincode::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn inscription(&self, id: &InscriptionId) -> Result<Inscription, RegistryError> {
        self.find(id)?.ok_or(RegistryError::NotFound { id: *id })
    }

    pub fn owner_of(&self, id: &InscriptionId) -> Result<Address, RegistryError> {
        Ok(self.inscription(id)?.current_owner)
    }

    /// Number of inscriptions currently owned by `owner`, including the null
    /// address.
    #[must_use]
    pub fn balance_of(&self, owner: Address) -> u64 {
        self.enumeration.balance_of(owner)
    }

    pub fn id_by_sequence_number(&self, sequence_number: u64) -> Result<InscriptionId, RegistryError> {
        let raw = self
            .content
            .kv()
            .get(&keys::sequence_to_id(sequence_number))?
            .ok_or(RegistryError::UnknownSequenceNumber(sequence_number))?;
        Hash::from_slice(&raw).ok_or_else(|| {
            RegistryError::Encoding(format!("sequence {sequence_number}: bad id length {}", raw.len()))
        })
    }

    pub fn sequence_number_of(&self, id: &InscriptionId) -> Result<u64, RegistryError> {
        Ok(self.inscription(id)?.sequence_number)
    }

    /// Raw content of the inscription.
    pub fn content_of(&self, id: &InscriptionId) -> Result<Vec<u8>, RegistryError> {
        let inscription = self.inscription(id)?;
        Ok(self.content.read(&inscription.content_hash)?)
    }

    #[must_use]
    pub fn total_supply(&self) -> u64 {
        self.enumeration.total_supply()
    }

    pub fn token_by_index(&self, index: u64) -> Result<u64, RegistryError> {
        self.enumeration
            .token_by_index(index)
            .ok_or(RegistryError::IndexOutOfBounds { index })
    }

    pub fn token_of_owner_by_index(&self, owner: Address, index: u64) -> Result<u64, RegistryError> {
        self.enumeration
            .token_of_owner_by_index(owner, index)
            .ok_or(RegistryError::IndexOutOfBounds { index })
    }

    /// Protocol associated at creation, if any.
    pub fn protocol_of(&self, id: &InscriptionId) -> Result<Option<String>, RegistryError> {
        let inscription = self.inscription(id)?;
        Ok(inscription.has_protocol().then_some(inscription.protocol))
    }

    /// Handler address registered for `name`.
    pub fn handler_for(&self, name: &str) -> Result<Option<Address>, RegistryError> {
        match self.content.kv().get(&keys::protocol(name))? {
            Some(raw) => Address::from_slice(&raw).map(Some).ok_or_else(|| {
                RegistryError::Encoding(format!("protocol {name}: bad handler length {}", raw.len()))
            }),
            None => Ok(None),
        }
    }

    #[must_use]
    pub fn pending_genesis_count(&self) -> usize {
        self.genesis_pending.len()
    }

    #[must_use]
    pub fn is_genesis_flushed(&self) -> bool {
        self.genesis_flushed
    }

    pub(crate) fn content_uri_seen(&self, content_uri_hash: &Hash) -> Result<bool, RegistryError> {
        Ok(self.content.kv().exists(&keys::content_uri(content_uri_hash))?)
    }
}
