//! Chain query gateway.
//!
//! The narrow, read-only view of the chain that resolution needs:
//! - `eth_call` against a contract
//! - `eth_getCode` for an address
//! - `eth_getLogs` for a block range
//!
//! Two adapters are provided: [`RpcGateway`] over Alloy's HTTP provider, and
//! [`MockGateway`], an in-memory chain for tests and offline runs.

pub mod mock;
pub mod rpc;

pub use mock::MockGateway;
pub use rpc::RpcGateway;

use alloy::primitives::{Address, Bytes, B256};
use async_trait::async_trait;

use crate::error::GatewayError;

/// Read-only chain access.
///
/// Implementations own transport concerns (timeouts, connection reuse). Callers do not
/// retry: a failure is surfaced as-is.
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Execute a view call against `to` with ABI-encoded `input`; returns raw return data.
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, GatewayError>;

    /// Bytecode stored at `address`. Empty for externally-owned accounts.
    async fn get_code(&self, address: Address) -> Result<Bytes, GatewayError>;

    /// Logs matching a block range, an emitting contract and a topic filter.
    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>, GatewayError>;
}

/// Log filter for [`ChainGateway::get_logs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// First block (inclusive).
    pub from_block: u64,
    /// Last block (inclusive).
    pub to_block: u64,
    /// Emitting contract.
    pub address: Address,
    /// Positional topic filter; `topics[0]` is the event signature.
    pub topics: Vec<B256>,
}

impl LogQuery {
    /// Filter for a single event signature on one contract.
    pub fn event(address: Address, signature: B256, from_block: u64, to_block: u64) -> Self {
        Self {
            from_block,
            to_block,
            address,
            topics: vec![signature],
        }
    }

    /// Whether a log satisfies this filter.
    pub fn matches(&self, entry: &LogEntry) -> bool {
        let in_range = entry
            .block_number
            .map(|n| (self.from_block..=self.to_block).contains(&n))
            .unwrap_or(false);

        in_range
            && entry.address == self.address
            && self
                .topics
                .iter()
                .enumerate()
                .all(|(i, topic)| entry.topics.get(i) == Some(topic))
    }
}

/// An emitted event record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogEntry {
    /// Emitting contract.
    pub address: Address,
    /// Indexed topics.
    pub topics: Vec<B256>,
    /// Non-indexed ABI-encoded payload.
    pub data: Bytes,
    /// Block containing the log (absent for pending logs).
    pub block_number: Option<u64>,
    /// Transaction that emitted the log.
    pub transaction_hash: Option<B256>,
}
