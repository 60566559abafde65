//! # Operation Payloads
//!
//! Payloads arrive as JSON. Amounts may be decimal strings or JSON integers;
//! both decode into `U256` whole-token units.
//!
//! ```text
//! deploy: {"tick":"test","max_supply":"1000000","mint_amount":"1000"}
//! mint:   {"tick":"test","id":"1","amount":"1000"}
//! ```

use crate::domain::errors::ProtocolError;
use primitive_types::U256;
use serde::Deserialize;

/// Longest accepted tick, in bytes.
pub const MAX_TICK_LENGTH: usize = 28;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(u64),
}

impl RawAmount {
    fn parse(self, field: &str) -> Result<U256, ProtocolError> {
        match self {
            RawAmount::Number(n) => Ok(U256::from(n)),
            RawAmount::Text(text) => U256::from_dec_str(text.trim()).map_err(|e| {
                ProtocolError::InvalidPayload(format!("{field}: {text:?} is not a decimal amount ({e:?})"))
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDeploy {
    tick: String,
    max_supply: RawAmount,
    mint_amount: RawAmount,
}

#[derive(Debug, Deserialize)]
struct RawMint {
    tick: String,
    id: RawAmount,
    amount: RawAmount,
}

/// Lower-cases a tick and checks it is 1–28 ASCII bytes.
pub fn normalize_tick(tick: &str) -> Result<String, ProtocolError> {
    if tick.is_empty() || tick.len() > MAX_TICK_LENGTH || !tick.is_ascii() {
        return Err(ProtocolError::InvalidTick(tick.to_string()));
    }
    Ok(tick.to_ascii_lowercase())
}

/// Decoded `op_deploy` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployParams {
    pub tick: String,
    pub max_supply: U256,
    pub mint_amount: U256,
}

impl DeployParams {
    pub fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        let raw: RawDeploy = serde_json::from_slice(data)?;
        Ok(Self {
            tick: normalize_tick(&raw.tick)?,
            max_supply: raw.max_supply.parse("max_supply")?,
            mint_amount: raw.mint_amount.parse("mint_amount")?,
        })
    }

    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.max_supply.is_zero() {
            return Err(ProtocolError::InvalidMaxSupply);
        }
        if self.mint_amount.is_zero() {
            return Err(ProtocolError::InvalidMintAmount);
        }
        if !(self.max_supply % self.mint_amount).is_zero() {
            return Err(ProtocolError::NotDivisible {
                max_supply: self.max_supply,
                mint_amount: self.mint_amount,
            });
        }
        Ok(())
    }
}

/// Decoded `op_mint` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintParams {
    pub tick: String,
    pub id: U256,
    pub amount: U256,
}

impl MintParams {
    pub fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        let raw: RawMint = serde_json::from_slice(data)?;
        Ok(Self {
            tick: normalize_tick(&raw.tick)?,
            id: raw.id.parse("id")?,
            amount: raw.amount.parse("amount")?,
        })
    }
}
