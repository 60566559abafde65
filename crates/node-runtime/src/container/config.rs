//! # Chain Configuration
//!
//! Unified configuration for the runtime: well-known system addresses,
//! content chunking, the token protocol and telemetry.
//!
//! ## Environment Overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `IC_REGISTRY_ADDRESS` | `addresses.registry` |
//! | `IC_TOKEN_HANDLER_ADDRESS` | `addresses.token_handler` |
//! | `IC_TOKEN_TEMPLATE_ADDRESS` | `addresses.token_template` |
//! | `IC_PROTOCOL_ADMIN` | `addresses.protocol_admin` |
//! | `IC_PROOF_FLUSHER` | `addresses.proof_flusher` |
//! | `IC_CHUNK_SIZE` | `content.chunk_size` |
//! | `IC_TOKEN_PROTOCOL_NAME` | `token_protocol.protocol_name` |
//! | `IC_GENESIS_FILE` | `genesis_path` |

use ic_01_content_store::ContentConfig;
use ic_telemetry::TelemetryConfig;
use shared_types::Address;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Protocol name the fixed-denomination token handler registers under.
pub const DEFAULT_TOKEN_PROTOCOL: &str = "erc-20-fixed-denomination";

/// Development predeploy: `0x3300…00<tag>`.
const fn predeploy(tag: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0x33;
    bytes[19] = tag;
    Address::new(bytes)
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct ChainConfig {
    pub addresses: SystemAddresses,
    pub content: ContentConfig,
    pub token_protocol: TokenProtocolConfig,
    pub telemetry: TelemetryConfig,
    /// Genesis file replayed before live operation.
    pub genesis_path: Option<PathBuf>,
}

/// Well-known addresses of the system contracts and privileged callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemAddresses {
    /// The inscription registry.
    pub registry: Address,
    /// The fixed-denomination token protocol handler.
    pub token_handler: Address,
    /// Implementation every token clone delegates to.
    pub token_template: Address,
    /// The only caller allowed to register protocols.
    pub protocol_admin: Address,
    /// The only caller allowed to flush the proof queue.
    pub proof_flusher: Address,
}

impl Default for SystemAddresses {
    fn default() -> Self {
        Self {
            registry: predeploy(0x01),
            token_handler: predeploy(0x02),
            token_template: predeploy(0x03),
            protocol_admin: predeploy(0x04),
            proof_flusher: predeploy(0x05),
        }
    }
}

impl SystemAddresses {
    fn roles(&self) -> [(&'static str, Address); 5] {
        [
            ("registry", self.registry),
            ("token_handler", self.token_handler),
            ("token_template", self.token_template),
            ("protocol_admin", self.protocol_admin),
            ("proof_flusher", self.proof_flusher),
        ]
    }
}

/// Token protocol parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenProtocolConfig {
    pub protocol_name: String,
}

impl Default for TokenProtocolConfig {
    fn default() -> Self {
        Self {
            protocol_name: DEFAULT_TOKEN_PROTOCOL.to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("System address for {role} is null")]
    NullAddress { role: &'static str },

    #[error("{first} and {second} share address {address}")]
    DuplicateAddress {
        first: &'static str,
        second: &'static str,
        address: Address,
    },

    #[error("Content chunk size must be non-zero")]
    InvalidChunkSize,

    #[error("Token protocol name is empty")]
    EmptyProtocolName,

    #[error("Invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

impl ChainConfig {
    /// Development defaults overridden from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self {
            telemetry: TelemetryConfig::from_lookup(&lookup),
            ..Self::default()
        };

        let addresses = &mut config.addresses;
        for (var, slot) in [
            ("IC_REGISTRY_ADDRESS", &mut addresses.registry),
            ("IC_TOKEN_HANDLER_ADDRESS", &mut addresses.token_handler),
            ("IC_TOKEN_TEMPLATE_ADDRESS", &mut addresses.token_template),
            ("IC_PROTOCOL_ADMIN", &mut addresses.protocol_admin),
            ("IC_PROOF_FLUSHER", &mut addresses.proof_flusher),
        ] {
            if let Some(raw) = lookup(var) {
                *slot = Address::from_str(raw.trim()).map_err(|e| ConfigError::InvalidVar {
                    var,
                    reason: e.to_string(),
                })?;
            }
        }

        if let Some(raw) = lookup("IC_CHUNK_SIZE") {
            config.content.chunk_size =
                raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::InvalidVar {
                        var: "IC_CHUNK_SIZE",
                        reason: e.to_string(),
                    }
                })?;
        }
        if let Some(name) = lookup("IC_TOKEN_PROTOCOL_NAME") {
            config.token_protocol.protocol_name = name;
        }
        config.genesis_path = lookup("IC_GENESIS_FILE").map(PathBuf::from);

        Ok(config)
    }

    /// Rejects null or shared system addresses and unusable component settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let roles = self.addresses.roles();
        for (i, &(role, address)) in roles.iter().enumerate() {
            if address.is_zero() {
                return Err(ConfigError::NullAddress { role });
            }
            if let Some(&(first, _)) = roles[..i].iter().find(|(_, a)| *a == address) {
                return Err(ConfigError::DuplicateAddress {
                    first,
                    second: role,
                    address,
                });
            }
        }

        if self.content.validate().is_err() {
            return Err(ConfigError::InvalidChunkSize);
        }
        if self.token_protocol.protocol_name.is_empty() {
            return Err(ConfigError::EmptyProtocolName);
        }
        Ok(())
    }
}
