//! Chunk pointer derivation.

use shared_types::{keccak256_packed, Address, Hash};

/// Address under which chunk `index` of `content_hash` is stored.
///
/// The pointer is the low 20 bytes of `keccak256(content_hash ‖ index)`, with
/// the index encoded as a 32-byte big-endian word.
#[must_use]
pub fn chunk_pointer(content_hash: &Hash, index: usize) -> Address {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&(index as u64).to_be_bytes());
    let digest = keccak256_packed(&[content_hash.as_bytes(), &word]);

    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest.as_bytes()[12..]);
    Address::new(bytes)
}

/// Splits `content` into chunk slices of at most `chunk_size` bytes.
pub(crate) fn split(content: &[u8], chunk_size: usize) -> impl Iterator<Item = &[u8]> {
    content.chunks(chunk_size)
}
