//! # Token Enumeration
//!
//! Ownership-list bookkeeping behind `balance_of`, `token_by_index` and
//! `token_of_owner_by_index`. Two disciplines share one trait:
//!
//! - [`SequentialEnumeration`]: ids are minted as 0, 1, 2, ... and never
//!   removed, so the global list is implicit.
//! - [`SparseEnumeration`]: arbitrary ids; removal swaps the last element into
//!   the vacated slot.
//!
//! Per-owner lists use swap-remove in both disciplines, so the order of an
//! owner's tokens changes when one of them leaves.
//!
//! A burn (transfer to the null address) goes through [`Enumeration::on_burn`].
//! The sequential discipline keeps the token listed under the null owner; the
//! sparse discipline removes it.

use shared_types::Address;
use std::collections::HashMap;
use thiserror::Error;

/// Enumeration bookkeeping failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnumerationError {
    /// Sequential mint skipped or reused an id.
    #[error("expected next token id {expected}, got {actual}")]
    NotNextId { expected: u64, actual: u64 },

    /// Token id already minted.
    #[error("token {0} already minted")]
    AlreadyMinted(u64),

    /// Sequential enumeration never removes tokens.
    #[error("token removal is not supported")]
    RemovalForbidden,

    /// Token is not listed under the given owner.
    #[error("token {token_id} is not owned by {owner}")]
    NotOwnedBy { token_id: u64, owner: Address },
}

/// Enumeration hooks invoked by the registry around ownership changes.
pub trait Enumeration: Send + Sync {
    /// Records a newly minted token under `to`.
    fn on_mint(&mut self, to: Address, token_id: u64) -> Result<(), EnumerationError>;

    /// Moves a token between owner lists.
    fn on_transfer(
        &mut self,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), EnumerationError>;

    /// Drops a token from every list before it is destroyed.
    fn on_remove(&mut self, owner: Address, token_id: u64) -> Result<(), EnumerationError>;

    /// Records a transfer of `token_id` from `from` to the null address.
    fn on_burn(&mut self, from: Address, token_id: u64) -> Result<(), EnumerationError>;

    fn total_supply(&self) -> u64;

    fn token_by_index(&self, index: u64) -> Option<u64>;

    fn token_of_owner_by_index(&self, owner: Address, index: u64) -> Option<u64>;

    fn balance_of(&self, owner: Address) -> u64;
}

// =============================================================================
// PER-OWNER LISTS
// =============================================================================

/// Owner → token list, with each token's position for O(1) removal.
#[derive(Debug, Default, Clone)]
struct OwnerTokens {
    lists: HashMap<Address, Vec<u64>>,
    positions: HashMap<u64, usize>,
}

impl OwnerTokens {
    fn add(&mut self, owner: Address, token_id: u64) {
        let list = self.lists.entry(owner).or_default();
        self.positions.insert(token_id, list.len());
        list.push(token_id);
    }

    fn remove(&mut self, owner: Address, token_id: u64) -> Result<(), EnumerationError> {
        let not_owned = EnumerationError::NotOwnedBy { token_id, owner };
        let position = *self.positions.get(&token_id).ok_or(not_owned.clone())?;
        let list = self.lists.get_mut(&owner).ok_or(not_owned.clone())?;
        if list.get(position) != Some(&token_id) {
            return Err(not_owned);
        }

        list.swap_remove(position);
        if let Some(&moved) = list.get(position) {
            self.positions.insert(moved, position);
        }
        if list.is_empty() {
            self.lists.remove(&owner);
        }
        self.positions.remove(&token_id);
        Ok(())
    }

    fn get(&self, owner: Address, index: u64) -> Option<u64> {
        let index = usize::try_from(index).ok()?;
        self.lists.get(&owner)?.get(index).copied()
    }

    fn count(&self, owner: Address) -> u64 {
        self.lists.get(&owner).map_or(0, |list| list.len() as u64)
    }
}

// =============================================================================
// SEQUENTIAL
// =============================================================================

/// Append-only enumeration: `total_supply` equals the next unassigned id.
#[derive(Debug, Default, Clone)]
pub struct SequentialEnumeration {
    next_id: u64,
    owners: OwnerTokens,
}

impl SequentialEnumeration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Enumeration for SequentialEnumeration {
    fn on_mint(&mut self, to: Address, token_id: u64) -> Result<(), EnumerationError> {
        if token_id != self.next_id {
            return Err(EnumerationError::NotNextId {
                expected: self.next_id,
                actual: token_id,
            });
        }
        self.owners.add(to, token_id);
        self.next_id += 1;
        Ok(())
    }

    fn on_transfer(
        &mut self,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), EnumerationError> {
        self.owners.remove(from, token_id)?;
        self.owners.add(to, token_id);
        Ok(())
    }

    fn on_remove(&mut self, _owner: Address, _token_id: u64) -> Result<(), EnumerationError> {
        Err(EnumerationError::RemovalForbidden)
    }

    fn on_burn(&mut self, from: Address, token_id: u64) -> Result<(), EnumerationError> {
        self.on_transfer(from, Address::ZERO, token_id)
    }

    fn total_supply(&self) -> u64 {
        self.next_id
    }

    fn token_by_index(&self, index: u64) -> Option<u64> {
        (index < self.next_id).then_some(index)
    }

    fn token_of_owner_by_index(&self, owner: Address, index: u64) -> Option<u64> {
        self.owners.get(owner, index)
    }

    fn balance_of(&self, owner: Address) -> u64 {
        self.owners.count(owner)
    }
}

// =============================================================================
// SPARSE
// =============================================================================

/// General enumeration over arbitrary ids with swap-and-pop removal.
#[derive(Debug, Default, Clone)]
pub struct SparseEnumeration {
    all: Vec<u64>,
    all_positions: HashMap<u64, usize>,
    owners: OwnerTokens,
}

impl SparseEnumeration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Enumeration for SparseEnumeration {
    fn on_mint(&mut self, to: Address, token_id: u64) -> Result<(), EnumerationError> {
        if self.all_positions.contains_key(&token_id) {
            return Err(EnumerationError::AlreadyMinted(token_id));
        }
        self.all_positions.insert(token_id, self.all.len());
        self.all.push(token_id);
        self.owners.add(to, token_id);
        Ok(())
    }

    fn on_transfer(
        &mut self,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), EnumerationError> {
        self.owners.remove(from, token_id)?;
        self.owners.add(to, token_id);
        Ok(())
    }

    fn on_remove(&mut self, owner: Address, token_id: u64) -> Result<(), EnumerationError> {
        self.owners.remove(owner, token_id)?;

        // Checked by the owner-list removal above.
        if let Some(position) = self.all_positions.remove(&token_id) {
            self.all.swap_remove(position);
            if let Some(&moved) = self.all.get(position) {
                self.all_positions.insert(moved, position);
            }
        }
        Ok(())
    }

    fn on_burn(&mut self, from: Address, token_id: u64) -> Result<(), EnumerationError> {
        self.on_remove(from, token_id)
    }

    fn total_supply(&self) -> u64 {
        self.all.len() as u64
    }

    fn token_by_index(&self, index: u64) -> Option<u64> {
        let index = usize::try_from(index).ok()?;
        self.all.get(index).copied()
    }

    fn token_of_owner_by_index(&self, owner: Address, index: u64) -> Option<u64> {
        self.owners.get(owner, index)
    }

    fn balance_of(&self, owner: Address) -> u64 {
        self.owners.count(owner)
    }
}
