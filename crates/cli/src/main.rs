//! Cronos ID command-line resolver.
//!
//! This binary provides:
//! - Offline namehash computation
//! - Forward resolution (label → owner)
//! - Reverse resolution with forward verification (address → name)
//! - EOA / contract classification
//! - Mint event listing
//!
//! Without `--config` the built-in Cronos mainnet deployment is used.

use std::path::PathBuf;

use alloy::primitives::Address;
use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use cronosid_core::Node;
use cronosid_resolver::config::{Config, LoggingConfig};
use tracing::debug;

mod cmd;

#[derive(Parser)]
#[command(name = "cronosid")]
#[command(version, about = "Resolve Cronos ID names and addresses", long_about = None)]
struct Cli {
    /// Path to configuration file (defaults to the Cronos mainnet preset)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the JSON-RPC URL
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the namehash of a name (offline)
    Namehash {
        /// Full name, e.g. alice.cro
        name: String,
    },

    /// Find the owner of a domain
    Owner {
        /// Label, with or without the TLD
        #[arg(required_unless_present = "node")]
        label: Option<String>,

        /// Look up a raw namehash node (0x + 64 hex) instead of a label
        #[arg(long, conflicts_with = "label")]
        node: Option<Node>,
    },

    /// Find the name an address claims, and verify it
    Reverse {
        /// Wallet address (0x...)
        address: Address,

        /// Print the reverse claim without the forward re-check
        #[arg(long)]
        unverified: bool,
    },

    /// Tell a key-controlled account from a contract
    Classify {
        /// Address (0x...)
        address: Address,
    },

    /// List domains minted in a block range
    Mints {
        /// First block (defaults to the configured start block)
        #[arg(long)]
        from: Option<u64>,

        /// Last block (defaults to one window after the first block, capped at the latest block)
        #[arg(long)]
        to: Option<u64>,
    },

    /// Mints, owner, classification and verified reverse lookup in one go
    Walkthrough {
        /// Label to start from, e.g. web3developer
        label: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref(), cli.rpc_url)?;

    // Initialize logging
    init_logging(cli.debug, &config.logging)?;

    debug!("Version: {}", env!("CARGO_PKG_VERSION"));
    debug!("RPC URL: {}", config.network.rpc_url);
    debug!("Registry: {}", config.contracts.registry);

    let ctx = cmd::Context::new(config, cli.json);

    // Execute command
    match cli.command {
        Command::Namehash { name } => cmd::namehash::run(&ctx, &name)?,
        Command::Owner { label, node } => match (label, node) {
            (_, Some(node)) => cmd::resolve::run_owner_node(&ctx, node).await?,
            (Some(label), None) => cmd::resolve::run_owner(&ctx, &label).await?,
            (None, None) => anyhow::bail!("Either a label or --node is required"),
        },
        Command::Reverse {
            address,
            unverified,
        } => cmd::resolve::run_reverse(&ctx, address, unverified).await?,
        Command::Classify { address } => cmd::resolve::run_classify(&ctx, address).await?,
        Command::Mints { from, to } => cmd::mints::run(&ctx, from, to).await?,
        Command::Walkthrough { label } => cmd::walkthrough::run(&ctx, &label).await?,
    }

    Ok(())
}

/// Load the configuration file, or the mainnet preset, and apply CLI overrides.
fn load_config(path: Option<&PathBuf>, rpc_url: Option<String>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::from_file(path).context("Failed to load configuration")?,
        None => Config::cronos_mainnet(),
    };

    if let Some(rpc_url) = rpc_url {
        config.network.rpc_url = rpc_url;
        config.validate()?;
    }

    Ok(config)
}

/// Initialize tracing subscriber for logging
///
/// Logs go to stderr so that stdout only carries command output.
fn init_logging(debug: bool, logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = if debug {
        EnvFilter::new("cronosid=debug,cronosid_resolver=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "cronosid={level},cronosid_resolver={level}",
                level = logging.level
            ))
        })
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.format == "json" {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_reverse_with_global_flags() {
        let cli = Cli::try_parse_from([
            "cronosid",
            "reverse",
            "0x1111111111111111111111111111111111111111",
            "--unverified",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Command::Reverse {
                address,
                unverified,
            } => {
                assert_eq!(address, Address::repeat_byte(0x11));
                assert!(unverified);
            }
            _ => panic!("expected reverse"),
        }
    }

    #[test]
    fn test_parse_owner_by_node() {
        let node = cronosid_core::namehash("alice.cro").unwrap();
        let node_hex = node.to_string();
        let cli = Cli::try_parse_from(["cronosid", "owner", "--node", node_hex.as_str()]).unwrap();

        match cli.command {
            Command::Owner { label, node: parsed } => {
                assert_eq!(label, None);
                assert_eq!(parsed, Some(node));
            }
            _ => panic!("expected owner"),
        }

        assert!(Cli::try_parse_from(["cronosid", "owner", "--node", "0x1234"]).is_err());
        assert!(Cli::try_parse_from(["cronosid", "owner"]).is_err());
        assert!(Cli::try_parse_from([
            "cronosid",
            "owner",
            "alice",
            "--node",
            node_hex.as_str(),
        ])
        .is_err());
    }

    #[test]
    fn test_parse_rejects_bad_address() {
        assert!(Cli::try_parse_from(["cronosid", "classify", "0x1234"]).is_err());
    }

    #[test]
    fn test_load_config_defaults_to_mainnet() {
        let config = load_config(None, None).unwrap();
        assert_eq!(config.network.chain_id, 25);
    }

    #[test]
    fn test_load_config_rpc_override() {
        let config = load_config(None, Some("http://localhost:8545".to_string())).unwrap();
        assert_eq!(config.network.rpc_url, "http://localhost:8545");

        assert!(load_config(None, Some(" ".to_string())).is_err());
    }
}
