//! Hashing utilities.
//!
//! Keccak-256 (not SHA3-256) as used by the EVM and the ENS namehash scheme.

use alloy_primitives::{keccak256 as alloy_keccak256, B256};

/// Compute keccak256 hash of input data.
///
/// This is a re-export of Alloy's keccak256 for convenience.
///
/// # Example
///
/// ```
/// use cronosid_core::hashing::keccak256;
///
/// let hash = keccak256(b"cro");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn keccak256(data: &[u8]) -> B256 {
    alloy_keccak256(data)
}

/// Hash a single label: `keccak256(utf8(label))`.
///
/// The empty label hashes to keccak256 of zero bytes; it is not rejected.
pub fn labelhash(label: &str) -> B256 {
    keccak256(label.as_bytes())
}

/// Fold a label hash into a parent node: `keccak256(parent || labelhash)`.
pub(crate) fn fold_node(parent: &B256, label_hash: &B256) -> B256 {
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(parent.as_slice());
    data[32..].copy_from_slice(label_hash.as_slice());

    keccak256(&data)
}
