//! # Genesis File Loader
//!
//! ```json
//! {
//!   "inscriptions": [
//!     {
//!       "id": "0x…32 bytes…",
//!       "creator": "0x…20 bytes…",
//!       "initial_owner": "0x…20 bytes…",
//!       "content": "data:,{\"p\":\"erc-20\",\"op\":\"deploy\",\"tick\":\"test\"}",
//!       "protocol": {
//!         "name": "erc-20-fixed-denomination",
//!         "operation": "deploy",
//!         "data": { "tick": "test", "max_supply": "1000000", "mint_amount": "1000" }
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! `content_uri_hash` defaults to the SHA-256 of `content`; `mimetype`
//! defaults to `text/plain`.

use crate::container::{ChainError, InscriptionChain};
use anyhow::Context;
use ic_03_inscription_registry::{CreateParams, OriginBlock, ProtocolParams};
use serde::Deserialize;
use shared_types::{sha256, Address, Bytes, Hash, InscriptionId, KeyValueStore};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Genesis loading errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// The file is not valid genesis JSON.
    #[error("Malformed genesis file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The same id appears twice.
    #[error("Duplicate genesis inscription {id}")]
    DuplicateId { id: InscriptionId },

    /// An inscription has no creator.
    #[error("Genesis inscription {id} has a null creator")]
    NullCreator { id: InscriptionId },
}

/// The parsed genesis file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenesisFile {
    #[serde(default)]
    pub inscriptions: Vec<GenesisInscription>,
}

/// One inscription in the genesis file.
#[derive(Debug, Clone, Deserialize)]
pub struct GenesisInscription {
    pub id: InscriptionId,
    pub creator: Address,
    pub initial_owner: Address,
    /// Raw content, usually a data URI.
    pub content: String,
    #[serde(default)]
    pub content_uri_hash: Option<Hash>,
    #[serde(default = "default_mimetype")]
    pub mimetype: String,
    #[serde(default)]
    pub esip6: bool,
    #[serde(default)]
    pub protocol: Option<GenesisProtocol>,
    #[serde(default)]
    pub origin: OriginBlock,
}

/// Protocol call carried by a genesis inscription.
#[derive(Debug, Clone, Deserialize)]
pub struct GenesisProtocol {
    pub name: String,
    pub operation: String,
    /// Handler payload; a JSON string is passed through verbatim, anything
    /// else is re-encoded as JSON.
    #[serde(default)]
    pub data: serde_json::Value,
}

fn default_mimetype() -> String {
    "text/plain".to_string()
}

impl GenesisProtocol {
    fn payload(&self) -> Result<Bytes, GenesisError> {
        match &self.data {
            serde_json::Value::Null => Ok(Bytes::new()),
            serde_json::Value::String(raw) => Ok(Bytes::from(raw.as_str())),
            other => Ok(Bytes::from(serde_json::to_vec(other)?)),
        }
    }
}

impl GenesisInscription {
    /// The creation intent this entry replays.
    pub fn to_params(&self) -> Result<CreateParams, GenesisError> {
        let protocol = match &self.protocol {
            Some(p) => Some(ProtocolParams {
                name: p.name.clone(),
                operation: p.operation.clone(),
                data: p.payload()?,
            }),
            None => None,
        };

        Ok(CreateParams {
            id: self.id,
            content_uri_hash: self
                .content_uri_hash
                .unwrap_or_else(|| sha256(self.content.as_bytes())),
            initial_owner: self.initial_owner,
            content: Bytes::from(self.content.as_str()),
            mimetype: self.mimetype.clone(),
            esip6: self.esip6,
            protocol,
            origin: self.origin,
        })
    }
}

impl GenesisFile {
    /// Reads and validates a genesis file.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read genesis file {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Invalid genesis file {}", path.display()))
    }

    /// Parses and validates genesis JSON.
    pub fn from_json(raw: &str) -> Result<Self, GenesisError> {
        let file: Self = serde_json::from_str(raw)?;
        file.validate()?;
        Ok(file)
    }

    pub fn validate(&self) -> Result<(), GenesisError> {
        let mut seen = HashSet::with_capacity(self.inscriptions.len());
        for inscription in &self.inscriptions {
            if inscription.creator.is_zero() {
                return Err(GenesisError::NullCreator { id: inscription.id });
            }
            if !seen.insert(inscription.id) {
                return Err(GenesisError::DuplicateId { id: inscription.id });
            }
        }
        Ok(())
    }

    /// Loads every inscription into `chain`, in file order. Returns the count.
    pub fn apply<S: KeyValueStore + 'static>(
        &self,
        chain: &mut InscriptionChain<S>,
    ) -> Result<usize, ChainError> {
        for inscription in &self.inscriptions {
            chain.load_genesis(inscription.creator, inscription.to_params()?)?;
        }
        info!(count = self.inscriptions.len(), "Genesis inscriptions loaded");
        Ok(self.inscriptions.len())
    }
}
