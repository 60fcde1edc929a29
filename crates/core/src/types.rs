//! Core types for Cronos ID resolution.

use alloy_primitives::{hex, B256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Namehash node (32 bytes).
///
/// Only ever produced by hashing a name; it is a lookup key and is never decoded back
/// into a name. Rendered as `0x` followed by 64 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node(B256);

impl Node {
    /// The node of the empty name.
    pub const ZERO: Node = Node(B256::ZERO);

    /// Wrap a raw 32-byte value.
    pub const fn new(bytes: B256) -> Self {
        Node(bytes)
    }

    /// Get the inner B256.
    pub const fn inner(&self) -> &B256 {
        &self.0
    }

    /// Unwrap into the inner B256.
    pub const fn into_inner(self) -> B256 {
        self.0
    }

    /// Convert to bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_ref()
    }

    /// Whether this is the zero node.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Node {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(trimmed).map_err(|_| CoreError::InvalidHex)?;
        if bytes.len() != 32 {
            return Err(CoreError::InvalidNode(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Node(B256::from_slice(&bytes)))
    }
}

impl From<B256> for Node {
    fn from(b: B256) -> Self {
        Node(b)
    }
}

impl From<[u8; 32]> for Node {
    fn from(bytes: [u8; 32]) -> Self {
        Node(B256::from(bytes))
    }
}

impl From<Node> for B256 {
    fn from(node: Node) -> Self {
        node.0
    }
}

/// What kind of account lives at an address.
///
/// Derived from bytecode presence, never stored. Key-controlled accounts exist at the same
/// address on every EVM chain; a contract (a multisig, say) usually exists on one chain only,
/// so funds sent to its address elsewhere are lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    /// Externally-owned account: no code, controlled by a private key.
    ExternallyOwned,
    /// Code-bearing account.
    Contract,
}

impl AddressKind {
    /// Classify from the bytecode stored at an address.
    ///
    /// Zero-length code is an EOA; anything else, even a single byte, is a contract.
    pub fn from_code(code: &[u8]) -> Self {
        if code.is_empty() {
            AddressKind::ExternallyOwned
        } else {
            AddressKind::Contract
        }
    }

    /// Whether the address is controlled identically on every EVM chain.
    pub const fn is_portable(&self) -> bool {
        matches!(self, AddressKind::ExternallyOwned)
    }

    /// Canonical lowercase string form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AddressKind::ExternallyOwned => "eoa",
            AddressKind::Contract => "contract",
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
