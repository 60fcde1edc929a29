//! # Cronos ID Core
//!
//! Name normalization, namehash and core types for resolving Cronos ID (`.cro`) domains.
//!
//! This crate is pure: it performs no I/O and holds no state. Everything that talks to
//! a chain lives in `cronosid-resolver`.
//!
//! ## Features
//!
//! - **Ethereum Types**: Uses Alloy primitives for Address, B256, and keccak256
//! - **Normalization**: UTS-46 `to_unicode` with STD3 ASCII rules, non-transitional
//! - **Namehash**: ENS-compatible recursive label hashing, bit-exact with the registry
//! - **Domain Types**: Node, AddressKind
//! - **Constants**: Naming conventions and the Cronos mainnet deployment

#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod hashing;
pub mod namehash;
pub mod normalize;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use error::{CoreError, Result};
pub use hashing::{keccak256, labelhash};
pub use namehash::{domain_name, namehash, namehash_normalized, reverse_name, strip_tld};
pub use normalize::normalize;
pub use types::*;

// Re-export Alloy primitives for convenience
pub use alloy_primitives::{Address, B256};
