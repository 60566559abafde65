//! Shared fixtures for scenarios and benchmarks.

use ic_03_inscription_registry::{CreateParams, ProtocolParams};
use node_runtime::{ChainConfig, InscriptionChain, DEFAULT_TOKEN_PROTOCOL};
use shared_types::{sha256, Address, Bytes, Event, Hash, InMemoryKVStore, Log};

pub const ALICE: Address = Address::repeat_byte(0xa1);
pub const BOB: Address = Address::repeat_byte(0xb0);
pub const CAROL: Address = Address::repeat_byte(0xc0);

pub type TestChain = InscriptionChain<InMemoryKVStore>;

/// A chain over in-memory stores with the development address layout.
pub fn chain() -> TestChain {
    InscriptionChain::in_memory(ChainConfig::default()).expect("default config is valid")
}

/// A plain inscription with content unique to `seed`.
pub fn inscription(seed: u8, owner: Address) -> CreateParams {
    text_inscription(Hash::repeat_byte(seed), owner, &format!("data:,item-{seed}"))
}

/// A plain inscription whose id encodes `index`, for bulk creation.
pub fn inscription_with_index(index: u32, owner: Address) -> CreateParams {
    let mut id = [0u8; 32];
    id[28..].copy_from_slice(&index.to_be_bytes());
    text_inscription(Hash::new(id), owner, &format!("data:,bulk-{index}"))
}

pub fn text_inscription(id: Hash, owner: Address, content: &str) -> CreateParams {
    CreateParams {
        id,
        content_uri_hash: sha256(content.as_bytes()),
        initial_owner: owner,
        content: Bytes::from(content),
        mimetype: "text/plain".to_string(),
        esip6: false,
        protocol: None,
        origin: Default::default(),
    }
}

/// An inscription carrying a token protocol operation with a JSON payload.
pub fn token_op(seed: u8, owner: Address, operation: &str, data: serde_json::Value) -> CreateParams {
    let payload = data.to_string();
    let mut params = text_inscription(
        Hash::repeat_byte(seed),
        owner,
        &format!("data:,{seed}:{operation}:{payload}"),
    );
    params.protocol = Some(ProtocolParams {
        name: DEFAULT_TOKEN_PROTOCOL.to_string(),
        operation: operation.to_string(),
        data: Bytes::from(payload.as_str()),
    });
    params
}

pub fn deploy(seed: u8, owner: Address, tick: &str, max_supply: &str, mint_amount: &str) -> CreateParams {
    token_op(
        seed,
        owner,
        "deploy",
        serde_json::json!({ "tick": tick, "max_supply": max_supply, "mint_amount": mint_amount }),
    )
}

pub fn mint(seed: u8, owner: Address, tick: &str, id: u64, amount: &str) -> CreateParams {
    token_op(
        seed,
        owner,
        "mint",
        serde_json::json!({ "tick": tick, "id": id.to_string(), "amount": amount }),
    )
}

/// The last log of a receipt, which is the dispatch outcome when a handler ran.
pub fn last_event(logs: &[Log]) -> &Event {
    &logs.last().expect("receipt has logs").event
}
