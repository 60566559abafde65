//! # Creation Events
//!
//! One function builds the creation log sequence for both live creation and
//! genesis replay, so a replayed inscription emits exactly what a live one
//! would have.

use crate::domain::entities::Inscription;
use shared_types::{Address, Event, Log};

/// Logs announcing the creation of `inscription`, in emission order.
///
/// - owned: `[Transfer(0→owner), EthscriptionTransferred(creator→owner), EthscriptionCreated]`
/// - null initial owner: `[Transfer(0→creator), Transfer(creator→0),
///   EthscriptionTransferred(creator→0), EthscriptionCreated]`
#[must_use]
pub fn creation_logs(registry: Address, inscription: &Inscription) -> Vec<Log> {
    let token_id = inscription.sequence_number;
    let creator = inscription.creator;
    let owner = inscription.initial_owner;

    let mut logs = Vec::with_capacity(4);
    if owner.is_zero() {
        logs.push(Log::new(
            registry,
            Event::Transfer {
                from: Address::ZERO,
                to: creator,
                token_id,
            },
        ));
        logs.push(Log::new(
            registry,
            Event::Transfer {
                from: creator,
                to: Address::ZERO,
                token_id,
            },
        ));
    } else {
        logs.push(Log::new(
            registry,
            Event::Transfer {
                from: Address::ZERO,
                to: owner,
                token_id,
            },
        ));
    }

    logs.push(Log::new(
        registry,
        Event::EthscriptionTransferred {
            id: inscription.id,
            from: creator,
            to: owner,
            sequence_number: token_id,
        },
    ));
    logs.push(Log::new(
        registry,
        Event::EthscriptionCreated {
            id: inscription.id,
            creator,
            initial_owner: owner,
            content_hash: inscription.content_hash,
            content_uri_hash: inscription.content_uri_hash,
            sequence_number: token_id,
        },
    ));
    logs
}

/// Logs for an ownership change of an existing inscription.
#[must_use]
pub fn transfer_logs(registry: Address, inscription: &Inscription, from: Address, to: Address) -> Vec<Log> {
    vec![
        Log::new(
            registry,
            Event::Transfer {
                from,
                to,
                token_id: inscription.sequence_number,
            },
        ),
        Log::new(
            registry,
            Event::EthscriptionTransferred {
                id: inscription.id,
                from,
                to,
                sequence_number: inscription.sequence_number,
            },
        ),
    ]
}

#[must_use]
pub fn protocol_registered_log(registry: Address, name: &str, handler: Address) -> Log {
    Log::new(
        registry,
        Event::ProtocolRegistered {
            name: name.to_string(),
            handler,
        },
    )
}
