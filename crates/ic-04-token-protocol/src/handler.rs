//! # Token Protocol Handler
//!
//! The handler contract invoked by the inscription registry. Records live in
//! the handler's own key-value store (`t:` ticker key → [`TokenInfo`],
//! `i:` inscription id → [`TokenItem`]); token contracts are held by address.
//!
//! Every operation validates completely before its first write, so a failed
//! call leaves the handler untouched.

use crate::domain::{
    normalize_tick, DeployParams, HandlerConfig, MintParams, ProtocolError, TokenInfo, TokenItem,
};
use ic_02_fixed_token::FixedCapacityToken;
use primitive_types::U256;
use shared_types::{
    derive_address, keccak256_packed, keys, Address, BatchOperation, Bytes, CallContext,
    CallOutcome, Event, Hash, InscriptionId, KeyValueStore, Log, ProtocolHandler,
};
use std::collections::HashMap;
use tracing::{debug, info};

/// Base units per whole token are `10^ONE_TOKEN_DECIMALS`.
pub const ONE_TOKEN_DECIMALS: usize = 18;

const OP_DEPLOY: &str = "op_deploy";
const OP_MINT: &str = "op_mint";

type CallResult = Result<(Bytes, Vec<Log>), ProtocolError>;

/// Fixed-denomination token protocol handler.
pub struct TokenProtocolHandler<S: KeyValueStore> {
    config: HandlerConfig,
    kv: S,
    tokens: HashMap<Address, FixedCapacityToken>,
}

impl<S: KeyValueStore> TokenProtocolHandler<S> {
    pub fn new(config: HandlerConfig, kv: S) -> Self {
        Self {
            config,
            kv,
            tokens: HashMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Storage key of a ticker: `keccak256(protocol_name ‖ tick)`.
    #[must_use]
    pub fn ticker_key(&self, tick: &str) -> Hash {
        keccak256_packed(&[self.config.protocol_name.as_bytes(), tick.as_bytes()])
    }

    /// Address of the token for `tick`: the deployed one, or the one a deploy
    /// would produce.
    pub fn predict_token_address(&self, tick: &str) -> Result<Address, ProtocolError> {
        let tick = normalize_tick(tick)?;
        if let Some(info) = self.token_info(&tick)? {
            return Ok(info.token_address);
        }
        Ok(self.derive_token_address(&tick))
    }

    fn derive_token_address(&self, tick: &str) -> Address {
        derive_address(
            self.config.address,
            self.ticker_key(tick),
            self.config.token_template,
        )
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// `op_deploy`: creates and initializes the ticker's token contract.
    pub fn deploy(&mut self, ctx: &CallContext, data: &[u8]) -> CallResult {
        let params = DeployParams::decode(data)?;
        if self.token_info(&params.tick)?.is_some() {
            return Err(ProtocolError::AlreadyDeployed { tick: params.tick });
        }
        params.validate()?;
        let cap = to_base_units(params.max_supply).ok_or(ProtocolError::InvalidMaxSupply)?;

        let token_address = self.derive_token_address(&params.tick);
        let mut token = FixedCapacityToken::new(token_address, self.config.address);
        token.initialize(
            self.config.address,
            params.tick.clone(),
            params.tick.to_ascii_uppercase(),
            cap,
            ctx.inscription.id,
        )?;

        let info = TokenInfo {
            tick: params.tick.clone(),
            max_supply: params.max_supply,
            mint_amount: params.mint_amount,
            total_minted: U256::zero(),
            token_address,
            deploy_inscription_id: ctx.inscription.id,
        };
        self.kv.put(
            &keys::token_info(&self.ticker_key(&params.tick)),
            &bincode::serialize(&info)?,
        )?;
        self.tokens.insert(token_address, token);

        info!(
            tick = %params.tick,
            token = %token_address,
            max_supply = %params.max_supply,
            mint_amount = %params.mint_amount,
            "Token deployed"
        );

        let log = Log::new(
            self.config.address,
            Event::TokenDeployed {
                tick: params.tick,
                token: token_address,
                max_supply: params.max_supply,
                mint_amount: params.mint_amount,
                deploy_id: ctx.inscription.id,
            },
        );
        Ok((Bytes::from_slice(token_address.as_bytes()), vec![log]))
    }

    /// `op_mint`: attaches a lot to the inscription and credits its initial owner.
    ///
    /// Mint ids are range-checked only; the same id may be minted repeatedly
    /// until the cap is reached.
    pub fn mint(&mut self, ctx: &CallContext, data: &[u8]) -> CallResult {
        let params = MintParams::decode(data)?;
        let mut info = self
            .token_info(&params.tick)?
            .ok_or_else(|| ProtocolError::NotDeployed {
                tick: params.tick.clone(),
            })?;

        if params.amount != info.mint_amount {
            return Err(ProtocolError::AmountMismatch {
                expected: info.mint_amount,
                actual: params.amount,
            });
        }
        let max = info.max_mint_id();
        if params.id < U256::one() || params.id > max {
            return Err(ProtocolError::InvalidMintId { id: params.id, max });
        }
        let base_units = to_base_units(params.amount).ok_or(ProtocolError::InvalidMintAmount)?;
        let recipient = ctx.inscription.initial_owner;

        let controller = self.config.address;
        let token = self.token_mut(info.token_address)?;
        let transfer_log = token.mint(controller, recipient, base_units)?;

        info.total_minted += params.amount;
        let item = TokenItem {
            amount: params.amount,
            deploy_inscription_id: info.deploy_inscription_id,
            tick: info.tick.clone(),
        };
        self.kv.atomic_batch_write(vec![
            BatchOperation::put(
                keys::token_info(&self.ticker_key(&info.tick)),
                bincode::serialize(&info)?,
            ),
            BatchOperation::put(keys::token_item(&ctx.inscription.id), bincode::serialize(&item)?),
        ])?;

        debug!(
            tick = %info.tick,
            id = ?ctx.inscription.id,
            to = %recipient,
            amount = %params.amount,
            total_minted = %info.total_minted,
            "Lot minted"
        );

        let minted = Log::new(
            self.config.address,
            Event::TokenMinted {
                tick: info.tick,
                id: ctx.inscription.id,
                to: recipient,
                amount: params.amount,
                mint_id: params.id,
            },
        );
        Ok((Bytes::new(), vec![transfer_log, minted]))
    }

    /// Moves the inscription's lot, if it carries one, from `from` to `to`.
    pub fn transfer_lot(&mut self, ctx: &CallContext, from: Address, to: Address) -> CallResult {
        let Some(item) = self.token_item(&ctx.inscription.id)? else {
            return Ok((Bytes::new(), Vec::new()));
        };
        let info = self
            .token_info(&item.tick)?
            .ok_or_else(|| ProtocolError::NotDeployed {
                tick: item.tick.clone(),
            })?;
        let base_units = to_base_units(item.amount).ok_or(ProtocolError::InvalidMintAmount)?;

        let controller = self.config.address;
        let token = self.token_mut(info.token_address)?;
        let transfer_log = token.force_transfer(controller, from, to, base_units)?;

        debug!(tick = %item.tick, id = ?ctx.inscription.id, %from, %to, "Lot transferred");

        let moved = Log::new(
            self.config.address,
            Event::TokenLotTransferred {
                tick: item.tick,
                id: ctx.inscription.id,
                from,
                to,
                amount: item.amount,
            },
        );
        Ok((Bytes::new(), vec![transfer_log, moved]))
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn token_info(&self, tick: &str) -> Result<Option<TokenInfo>, ProtocolError> {
        let tick = normalize_tick(tick)?;
        match self.kv.get(&keys::token_info(&self.ticker_key(&tick)))? {
            Some(raw) => Ok(Some(bincode::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn token_item(&self, id: &InscriptionId) -> Result<Option<TokenItem>, ProtocolError> {
        match self.kv.get(&keys::token_item(id))? {
            Some(raw) => Ok(Some(bincode::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    /// Token contract deployed at `address`.
    #[must_use]
    pub fn token(&self, address: Address) -> Option<&FixedCapacityToken> {
        self.tokens.get(&address)
    }

    /// Base-unit balance of `owner` in the token for `tick`; zero when undeployed.
    pub fn balance_of(&self, tick: &str, owner: Address) -> Result<U256, ProtocolError> {
        Ok(self
            .token_info(tick)?
            .and_then(|info| self.token(info.token_address))
            .map(|token| token.balance_of(owner))
            .unwrap_or_default())
    }

    /// All deployed tickers, in ticker-key order.
    pub fn tokens(&self) -> Result<Vec<TokenInfo>, ProtocolError> {
        self.kv
            .prefix_scan(keys::TOKEN_INFO)?
            .into_iter()
            .map(|(_, raw)| bincode::deserialize(&raw).map_err(ProtocolError::from))
            .collect()
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn ensure_registry(&self, caller: Address) -> Result<(), ProtocolError> {
        if caller != self.config.registry {
            return Err(ProtocolError::OnlyRegistry { caller });
        }
        Ok(())
    }

    fn token_mut(&mut self, address: Address) -> Result<&mut FixedCapacityToken, ProtocolError> {
        self.tokens
            .get_mut(&address)
            .ok_or_else(|| ProtocolError::Encoding(format!("no token contract at {address}")))
    }
}

/// `amount × 10^18`, or `None` on overflow.
fn to_base_units(amount: U256) -> Option<U256> {
    amount.checked_mul(U256::exp10(ONE_TOKEN_DECIMALS))
}

impl<S: KeyValueStore> ProtocolHandler for TokenProtocolHandler<S> {
    fn address(&self) -> Address {
        self.config.address
    }

    fn call(&mut self, ctx: &CallContext, function: &str, data: &[u8]) -> CallOutcome {
        let result = self.ensure_registry(ctx.caller).and_then(|()| match function {
            OP_DEPLOY => self.deploy(ctx, data),
            OP_MINT => self.mint(ctx, data),
            other => Err(ProtocolError::UnknownFunction(other.to_string())),
        });
        CallOutcome::from_result(result)
    }

    fn on_transfer(&mut self, ctx: &CallContext, from: Address, to: Address) -> CallOutcome {
        let result = self
            .ensure_registry(ctx.caller)
            .and_then(|()| self.transfer_lot(ctx, from, to));
        CallOutcome::from_result(result)
    }
}

// =============================================================================
// TESTS
// =============================================================================
