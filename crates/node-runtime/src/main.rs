//! # Inscription-Chain Node Runtime
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Install telemetry
//! 3. Validate configuration
//! 4. Wire the components and bind the token protocol
//! 5. Replay the genesis file (if configured) and close genesis
//! 6. Flush the proofs for the genesis block

use anyhow::{Context, Result};
use ic_telemetry::init_telemetry;
use node_runtime::{ChainConfig, GenesisFile, InscriptionChain};
use shared_types::BlockContext;
use tracing::info;

fn main() -> Result<()> {
    let config = ChainConfig::from_env().context("Failed to load configuration")?;
    let _telemetry = init_telemetry(&config.telemetry)?;

    info!("===========================================");
    info!("  Inscription-Chain Node Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    config.validate().context("Invalid configuration")?;
    let genesis = match &config.genesis_path {
        Some(path) => GenesisFile::from_path(path)?,
        None => GenesisFile::default(),
    };

    let mut chain = InscriptionChain::in_memory(config)?;
    chain.begin_block(BlockContext::new(0, 0));
    let loaded = genesis.apply(&mut chain)?;
    let replay = chain.flush_genesis()?;
    let proofs = chain.end_block()?;

    let stats = chain.stats();
    info!(
        loaded,
        replayed = replay.output,
        events = replay.logs.len(),
        proofs = proofs.len(),
        handler_successes = stats.handler_successes,
        handler_failures = stats.handler_failures,
        tokens = chain.tokens()?.len(),
        "Genesis block complete"
    );
    Ok(())
}
