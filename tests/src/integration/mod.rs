//! # Integration Scenarios
//!
//! Each module drives the [`InscriptionChain`](node_runtime::InscriptionChain)
//! facade end to end, the way the import pipeline would.
//!
//! | Module | Flow |
//! |--------|------|
//! | `registry_flows` | creation, dedup, transfers, enumeration |
//! | `protocol_registry` | protocol binding rules |
//! | `token_protocol` | deploy → mint → transfer with shadow balances |
//! | `genesis_replay` | genesis file → deferred events |
//! | `proof_flow` | touched inscriptions → proofs per block |

pub mod genesis_replay;
pub mod proof_flow;
pub mod protocol_registry;
pub mod registry_flows;
pub mod token_protocol;
