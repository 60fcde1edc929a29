//! ENS namehash.
//!
//! ```text
//! namehash("")        = 0x00…00
//! namehash(l . rest)  = keccak256(namehash(rest) || keccak256(l))
//! ```
//!
//! Labels are folded from the rightmost to the leftmost, so a child node can only be
//! derived from its parent node plus the child label. The registry was populated by a
//! namehash-compliant client, so this must stay bit-exact with the ENS reference.

use alloy_primitives::{hex, Address, B256};

use crate::constants::{LABEL_SEPARATOR, REVERSE_SUFFIX};
use crate::error::Result;
use crate::hashing::{fold_node, labelhash};
use crate::normalize::normalize;
use crate::types::Node;

/// Compute the node of a full dotted name.
///
/// The empty name maps to [`Node::ZERO`] without normalization. Any other name is
/// normalized first; empty labels (`".a"`, `"a."`, `"a..b"`) are hashed as the hash of
/// zero bytes, never skipped or rejected.
///
/// # Errors
///
/// Returns [`CoreError::Normalization`](crate::CoreError::Normalization) if the name
/// contains a code point disallowed by the mapping table.
///
/// # Example
///
/// ```
/// use cronosid_core::namehash;
///
/// let node = namehash("eth").unwrap();
/// assert_eq!(
///     node.to_string(),
///     "0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae"
/// );
/// ```
pub fn namehash(name: &str) -> Result<Node> {
    if name.is_empty() {
        return Ok(Node::ZERO);
    }

    let normalized = normalize(name)?;
    Ok(namehash_normalized(&normalized))
}

/// Fold an already-normalized name into its node.
///
/// No mapping table is applied, which makes this infallible.
pub fn namehash_normalized(name: &str) -> Node {
    if name.is_empty() {
        return Node::ZERO;
    }

    let node = name
        .rsplit(LABEL_SEPARATOR)
        .fold(B256::ZERO, |parent, label| fold_node(&parent, &labelhash(label)));

    Node::new(node)
}

/// Build the reverse-lookup name for an address: `<lowercase hex, no 0x>.addr.reverse`.
pub fn reverse_name(address: &Address) -> String {
    format!(
        "{}{}{}",
        hex::encode(address),
        LABEL_SEPARATOR,
        REVERSE_SUFFIX
    )
}

/// Append a top-level domain to a label: `alice` + `cro` → `alice.cro`.
pub fn domain_name(label: &str, tld: &str) -> String {
    format!("{}{}{}", label, LABEL_SEPARATOR, tld)
}

/// Strip a trailing `.tld` from a full name, if present.
pub fn strip_tld<'a>(name: &'a str, tld: &str) -> Option<&'a str> {
    name.strip_suffix(tld)?.strip_suffix(LABEL_SEPARATOR)
}
