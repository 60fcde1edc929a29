//! JSON-RPC gateway over Alloy's HTTP provider.

use std::future::{Future, IntoFuture};
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes};
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::rpc::types::{Filter, Log, TransactionRequest};
use alloy::transports::http::reqwest::Url;
use alloy::transports::http::{Client, Http};
use async_trait::async_trait;
use tracing::debug;

use super::{ChainGateway, LogEntry, LogQuery};
use crate::error::GatewayError;

/// HTTP RPC gateway.
#[derive(Clone)]
pub struct RpcGateway {
    provider: RootProvider<Http<Client>>,
    timeout: Duration,
}

impl RpcGateway {
    /// Create a new gateway. No request is made until the first query.
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let url = rpc_url
            .parse::<Url>()
            .map_err(|e| GatewayError::InvalidEndpoint {
                url: rpc_url.to_string(),
                reason: e.to_string(),
            })?;

        let provider = ProviderBuilder::new().on_http(url);

        Ok(Self { provider, timeout })
    }

    /// Get the latest block number.
    pub async fn block_number(&self) -> Result<u64, GatewayError> {
        self.with_timeout("eth_blockNumber", self.provider.get_block_number().into_future())
            .await
    }

    /// Get the chain ID reported by the node.
    pub async fn chain_id(&self) -> Result<u64, GatewayError> {
        self.with_timeout("eth_chainId", self.provider.get_chain_id().into_future())
            .await
    }

    async fn with_timeout<T, E, F>(&self, method: &'static str, fut: F) -> Result<T, GatewayError>
    where
        E: std::fmt::Display,
        F: Future<Output = Result<T, E>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(GatewayError::Transport {
                method,
                message: e.to_string(),
            }),
            Err(_) => Err(GatewayError::Timeout {
                method,
                secs: self.timeout.as_secs(),
            }),
        }
    }
}

#[async_trait]
impl ChainGateway for RpcGateway {
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, GatewayError> {
        debug!("eth_call to={} input_len={}", to, input.len());

        let tx = TransactionRequest::default().with_to(to).with_input(input);
        self.with_timeout("eth_call", self.provider.call(&tx).into_future())
            .await
    }

    async fn get_code(&self, address: Address) -> Result<Bytes, GatewayError> {
        debug!("eth_getCode address={}", address);

        self.with_timeout("eth_getCode", self.provider.get_code_at(address).into_future())
            .await
    }

    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>, GatewayError> {
        debug!(
            "eth_getLogs address={} blocks={}..={}",
            query.address, query.from_block, query.to_block
        );

        let mut filter = Filter::new()
            .address(query.address)
            .from_block(query.from_block)
            .to_block(query.to_block);
        if let Some(signature) = query.topics.first() {
            filter = filter.event_signature(*signature);
        }
        if let Some(topic) = query.topics.get(1) {
            filter = filter.topic1(*topic);
        }
        if let Some(topic) = query.topics.get(2) {
            filter = filter.topic2(*topic);
        }
        if let Some(topic) = query.topics.get(3) {
            filter = filter.topic3(*topic);
        }

        let logs: Vec<Log> = self
            .with_timeout("eth_getLogs", self.provider.get_logs(&filter))
            .await?;

        Ok(logs.into_iter().map(LogEntry::from).collect())
    }
}

impl From<Log> for LogEntry {
    fn from(log: Log) -> Self {
        Self {
            address: log.address(),
            topics: log.topics().to_vec(),
            data: log.data().data.clone(),
            block_number: log.block_number,
            transaction_hash: log.transaction_hash,
        }
    }
}
