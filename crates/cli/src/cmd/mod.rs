pub mod mints;
pub mod namehash;
pub mod resolve;
pub mod walkthrough;

use anyhow::{Context as _, Result};
use cronosid_resolver::{Config, MintScanner, ResolutionEngine, RpcGateway};
use serde::Serialize;
use tracing::warn;

/// Shared state for subcommands.
pub struct Context {
    pub config: Config,
    pub json: bool,
}

impl Context {
    pub fn new(config: Config, json: bool) -> Self {
        Self { config, json }
    }

    /// Connect to the configured node and check it serves the expected chain.
    pub async fn connect(&self) -> Result<RpcGateway> {
        let network = &self.config.network;
        let gateway = RpcGateway::new(&network.rpc_url, self.config.request_timeout())?;

        let chain_id = gateway
            .chain_id()
            .await
            .with_context(|| format!("Failed to reach {}", network.rpc_url))?;
        if chain_id != network.chain_id {
            warn!(
                "Chain ID mismatch: node reports {}, config expects {}",
                chain_id, network.chain_id
            );
        }

        Ok(gateway)
    }

    pub fn engine(&self, gateway: RpcGateway) -> ResolutionEngine<RpcGateway> {
        ResolutionEngine::new(gateway, self.config.naming_config())
    }

    pub fn scanner(&self, gateway: RpcGateway) -> Result<MintScanner<RpcGateway>> {
        let contracts = &self.config.contracts;
        let (Some(contract), Some(topic)) = (contracts.minting, contracts.mint_event_topic) else {
            anyhow::bail!("Mint scanning needs contracts.minting and contracts.mint_event_topic");
        };

        Ok(MintScanner::new(
            gateway,
            contract,
            topic,
            self.config.naming.tld.clone(),
        ))
    }

    /// Print `value` as JSON when `--json` is set, otherwise run `human`.
    pub fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce()) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human();
        }
        Ok(())
    }
}
