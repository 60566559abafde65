//! # Token Records
//!
//! Both records are permanent: once written they are only ever updated
//! (`total_minted`), never deleted.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::{Address, InscriptionId};

/// A deployed ticker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub tick: String,
    /// Whole-token supply limit.
    pub max_supply: U256,
    /// Whole tokens carried by each mint inscription.
    pub mint_amount: U256,
    /// Whole tokens minted so far.
    pub total_minted: U256,
    pub token_address: Address,
    pub deploy_inscription_id: InscriptionId,
}

impl TokenInfo {
    /// Highest valid mint id.
    #[must_use]
    pub fn max_mint_id(&self) -> U256 {
        self.max_supply / self.mint_amount
    }
}

/// The lot carried by a mint inscription.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenItem {
    /// Whole tokens in the lot.
    pub amount: U256,
    pub deploy_inscription_id: InscriptionId,
    /// Ticker of the deploy, for locating the token contract.
    pub tick: String,
}

/// Addresses and naming the handler is deployed with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// The handler's own address; deployer of every token clone.
    pub address: Address,
    /// The only caller the handler accepts.
    pub registry: Address,
    /// Implementation the token clones delegate to.
    pub token_template: Address,
    /// Protocol name mixed into ticker keys.
    pub protocol_name: String,
}
