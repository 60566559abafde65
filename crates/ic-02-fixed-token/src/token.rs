//! # Fixed-Capacity Token
//!
//! One instance per deployed ticker. Instances are created by the token
//! protocol handler at a deterministic clone address and initialized once.

use crate::errors::TokenError;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Event, InscriptionId, Log};
use std::collections::HashMap;
use tracing::debug;

/// Fixed ERC-20 decimals.
pub const DECIMALS: u8 = 18;

/// Values set once by `initialize`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    /// Maximum total supply in base units.
    pub cap: U256,
    /// Inscription that deployed the token.
    pub origin_id: InscriptionId,
}

/// Capped, controller-only balance sheet.
#[derive(Clone, Debug)]
pub struct FixedCapacityToken {
    address: Address,
    controller: Address,
    metadata: Option<TokenMetadata>,
    balances: HashMap<Address, U256>,
    total_supply: U256,
}

impl FixedCapacityToken {
    /// Creates an uninitialized token at `address` controlled by `controller`.
    #[must_use]
    pub fn new(address: Address, controller: Address) -> Self {
        Self {
            address,
            controller,
            metadata: None,
            balances: HashMap::new(),
            total_supply: U256::zero(),
        }
    }

    // =========================================================================
    // CONTROLLER OPERATIONS
    // =========================================================================

    /// One-time setup of name, symbol, cap and originating inscription.
    pub fn initialize(
        &mut self,
        caller: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        cap: U256,
        origin_id: InscriptionId,
    ) -> Result<(), TokenError> {
        self.ensure_controller(caller)?;
        if self.metadata.is_some() {
            return Err(TokenError::AlreadyInitialized);
        }

        let metadata = TokenMetadata {
            name: name.into(),
            symbol: symbol.into(),
            cap,
            origin_id,
        };
        debug!(token = %self.address, name = %metadata.name, %cap, "Token initialized");
        self.metadata = Some(metadata);
        Ok(())
    }

    /// Mints `amount` base units to `to`. The null address is a valid recipient.
    pub fn mint(&mut self, caller: Address, to: Address, amount: U256) -> Result<Log, TokenError> {
        self.ensure_controller(caller)?;
        let cap = self.metadata()?.cap;

        let total_supply = self.total_supply;
        let new_supply = match total_supply.checked_add(amount) {
            Some(supply) if supply <= cap => supply,
            _ => {
                return Err(TokenError::CapExceeded {
                    total_supply,
                    amount,
                    cap,
                })
            }
        };

        self.total_supply = new_supply;
        *self.balances.entry(to).or_default() += amount;
        Ok(self.transfer_log(Address::ZERO, to, amount))
    }

    /// Moves `amount` from `from` to `to` regardless of approvals. Either side
    /// may be the null address.
    pub fn force_transfer(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<Log, TokenError> {
        self.ensure_controller(caller)?;
        self.metadata()?;

        let available = self.balance_of(from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                holder: from,
                available,
                required: amount,
            });
        }

        self.balances.insert(from, available - amount);
        *self.balances.entry(to).or_default() += amount;
        Ok(self.transfer_log(from, to, amount))
    }

    // =========================================================================
    // DISABLED HOLDER OPERATIONS
    // =========================================================================

    pub fn transfer(&mut self, _to: Address, _amount: U256) -> Result<(), TokenError> {
        Err(TokenError::DisabledOperation("transfer"))
    }

    pub fn transfer_from(
        &mut self,
        _from: Address,
        _to: Address,
        _amount: U256,
    ) -> Result<(), TokenError> {
        Err(TokenError::DisabledOperation("transferFrom"))
    }

    pub fn approve(&mut self, _spender: Address, _amount: U256) -> Result<(), TokenError> {
        Err(TokenError::DisabledOperation("approve"))
    }

    // =========================================================================
    // READS
    // =========================================================================

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub fn controller(&self) -> Address {
        self.controller
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.metadata.is_some()
    }

    pub fn name(&self) -> Result<&str, TokenError> {
        Ok(&self.metadata()?.name)
    }

    pub fn symbol(&self) -> Result<&str, TokenError> {
        Ok(&self.metadata()?.symbol)
    }

    #[must_use]
    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    pub fn cap(&self) -> Result<U256, TokenError> {
        Ok(self.metadata()?.cap)
    }

    pub fn origin_id(&self) -> Result<InscriptionId, TokenError> {
        Ok(self.metadata()?.origin_id)
    }

    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    #[must_use]
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    /// Approvals are disabled, so every allowance is zero.
    #[must_use]
    pub fn allowance(&self, _owner: Address, _spender: Address) -> U256 {
        U256::zero()
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn metadata(&self) -> Result<&TokenMetadata, TokenError> {
        self.metadata.as_ref().ok_or(TokenError::NotInitialized)
    }

    fn ensure_controller(&self, caller: Address) -> Result<(), TokenError> {
        if caller != self.controller {
            return Err(TokenError::OnlyController { caller });
        }
        Ok(())
    }

    fn transfer_log(&self, from: Address, to: Address, value: U256) -> Log {
        Log::new(self.address, Event::TokenTransfer { from, to, value })
    }
}

// =============================================================================
// TESTS
// =============================================================================
