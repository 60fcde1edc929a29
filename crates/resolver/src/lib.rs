//! Cronos ID resolution over an EVM JSON-RPC gateway.
//!
//! This crate provides:
//! - The chain query gateway trait, with an Alloy HTTP adapter and an in-memory adapter
//! - Registry / resolver contract bindings
//! - Forward resolution (name → owner), reverse resolution (address → claimed name)
//!   and the forward re-check that turns a reverse claim into a verified name
//! - EOA vs contract classification
//! - Mint event scanning over a block range
//! - TOML configuration
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  ResolutionEngine                        │
//! │                                          │
//! │  name ──► normalize ──► namehash ──► node│
//! │                                     │    │
//! │      ┌──────────────────────────────┘    │
//! │      ▼                                   │
//! │  registry.owner(node)     (forward)      │
//! │  registry.resolver(node)  (reverse hop 1)│
//! │  resolver.name(node)      (reverse hop 2)│
//! │  eth_getCode(address)     (classify)     │
//! └──────────────┬───────────────────────────┘
//!                │ ChainGateway
//!        ┌───────┴────────┐
//!        ▼                ▼
//!   RpcGateway       MockGateway
//!   (Alloy HTTP)     (in-memory)
//! ```
//!
//! Reverse records are claims. Anyone can point their reverse record at any name, so a
//! reverse answer is only trusted after [`ResolutionEngine::verify_reverse`] has resolved
//! the claimed name forward and found the original address.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod contracts;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod mints;

pub use config::Config;
pub use engine::{NamingConfig, ResolutionEngine, VerifiedName};
pub use error::{GatewayError, NoReverseCause, ResolveError, Result};
pub use gateway::{ChainGateway, LogEntry, LogQuery, MockGateway, RpcGateway};
pub use mints::{MintScanner, MintedDomain};

// Re-export common types
pub use cronosid_core::{types::*, *};
