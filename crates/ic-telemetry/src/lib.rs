//! # Inscription-Chain Telemetry
//!
//! Structured logging for every Inscription-Chain component, built on
//! `tracing` and `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ic_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(&TelemetryConfig::from_env())?;
//! tracing::info!("node started");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `inscription-chain` | Service name attached to logs |
//! | `IC_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `IC_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `IC_JSON_LOGS` | `false` (`true` in containers) | JSON instead of pretty output |
//! | `IC_NETWORK` | `devnet` | Network identifier |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log filter directive could not be parsed.
    #[error("Invalid log filter {directive:?}: {reason}")]
    Filter { directive: String, reason: String },

    /// A global subscriber is already installed.
    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}

/// Installs the global subscriber.
///
/// Returns a guard to hold for the lifetime of the process; dropping it logs
/// the shutdown.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    init_logging(config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name.clone(),
    })
}

/// Guard that marks the telemetry lifetime.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}
