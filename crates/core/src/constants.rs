//! Naming conventions and the Cronos mainnet deployment.
//!
//! The deployment values are only the defaults behind `Config::cronos_mainnet()` in the
//! resolver crate; every one of them can be overridden from configuration.

use alloy_primitives::{address, b256, Address, B256};

/// Top-level domain appended to labels by forward resolution.
pub const DEFAULT_TLD: &str = "cro";

/// Reverse-lookup zone. Reverse names are `<hex address>.addr.reverse`.
pub const REVERSE_SUFFIX: &str = "addr.reverse";

/// Public Cronos EVM JSON-RPC endpoint.
pub const CRONOS_MAINNET_RPC_URL: &str = "https://evm.cronos.org";

/// Cronos mainnet chain ID.
pub const CRONOS_MAINNET_CHAIN_ID: u64 = 25;

/// Cronos ID registry contract (ENS-style `owner` / `resolver` lookups).
pub const CRONOS_ID_REGISTRY: Address = address!("7F4C61116729d5b27E5f180062Fdfbf32E9283E5");

/// Cronos ID storefront contract that emits an event for every minted domain.
pub const CRONOS_ID_MINTING_CONTRACT: Address =
    address!("AfF2b5CF1950E8Fb22907CcD643728a5Dc75278B");

/// Topic0 of the storefront's domain-minted event.
pub const CRONOS_ID_MINT_EVENT_TOPIC: B256 =
    b256!("69e37f151eb98a09618ddaa80c8cfaf1ce5996867c489f45b555b412271ebf27");

/// First block scanned for mint events when none is configured.
pub const DEFAULT_MINT_SCAN_START_BLOCK: u64 = 4_932_153;

/// Number of blocks covered by a single log query.
pub const DEFAULT_MINT_SCAN_WINDOW: u64 = 2_000;

/// Separator between labels.
pub const LABEL_SEPARATOR: char = '.';
