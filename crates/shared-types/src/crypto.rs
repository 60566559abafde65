//! # Hashing & Deterministic Address Derivation
//!
//! Pure functions with no side effects. The same [`derive_address`] call is
//! used to predict a token contract address and to deploy it, so the two can
//! never diverge.

use crate::entities::{Address, Hash};
use sha2::Sha256;
use sha3::{Digest, Keccak256};

// =============================================================================
// HASHING
// =============================================================================

/// Computes keccak256 of data.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    Hash::new(Keccak256::digest(data).into())
}

/// Computes keccak256 over the concatenation of several slices
/// (the `abi.encodePacked` layout).
#[must_use]
pub fn keccak256_packed(parts: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    Hash::new(hasher.finalize().into())
}

/// Computes SHA-256 of data. Content hashes use this digest.
#[must_use]
pub fn sha256(data: &[u8]) -> Hash {
    Hash::new(Sha256::digest(data).into())
}

// =============================================================================
// CONTRACT ADDRESS COMPUTATION
// =============================================================================

/// Computes the contract address for CREATE2.
///
/// Address = keccak256(0xff ++ sender ++ salt ++ `keccak256(init_code)`)\[12:\]
///
/// Per EIP-1014.
#[must_use]
pub fn compute_contract_address_create2(sender: Address, salt: Hash, init_code: &[u8]) -> Address {
    let code_hash = Keccak256::digest(init_code);

    let mut data = Vec::with_capacity(85);
    data.push(0xff);
    data.extend_from_slice(sender.as_bytes());
    data.extend_from_slice(salt.as_bytes());
    data.extend_from_slice(&code_hash);

    let hash = Keccak256::digest(&data);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..32]);
    Address::new(addr)
}

const CLONE_PREFIX: [u8; 20] = [
    0x3d, 0x60, 0x2d, 0x80, 0x60, 0x0a, 0x3d, 0x39, 0x81, 0xf3, 0x36, 0x3d, 0x3d, 0x37, 0x3d, 0x3d,
    0x3d, 0x36, 0x3d, 0x73,
];

const CLONE_SUFFIX: [u8; 15] = [
    0x5a, 0xf4, 0x3d, 0x82, 0x80, 0x3e, 0x90, 0x3d, 0x91, 0x60, 0x2b, 0x57, 0xfd, 0x5b, 0xf3,
];

/// Builds the EIP-1167 minimal-proxy init code delegating to `template`.
#[must_use]
pub fn clone_init_code(template: Address) -> Vec<u8> {
    let mut code = Vec::with_capacity(CLONE_PREFIX.len() + 20 + CLONE_SUFFIX.len());
    code.extend_from_slice(&CLONE_PREFIX);
    code.extend_from_slice(template.as_bytes());
    code.extend_from_slice(&CLONE_SUFFIX);
    code
}

/// Derives the address of a deterministic clone of `template` deployed by
/// `deployer` with `salt`.
#[must_use]
pub fn derive_address(deployer: Address, salt: Hash, template: Address) -> Address {
    compute_contract_address_create2(deployer, salt, &clone_init_code(template))
}

// =============================================================================
// TESTS
// =============================================================================
