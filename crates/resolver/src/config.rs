//! Configuration management for Cronos ID resolution.
//!
//! This module handles loading configuration from:
//! - TOML files
//! - Environment variables (`${VAR}` references inside the TOML)
//! - Default values (the Cronos mainnet deployment)

use alloy::primitives::{Address, B256};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::engine::NamingConfig;
use cronosid_core::constants::{
    CRONOS_ID_MINTING_CONTRACT, CRONOS_ID_MINT_EVENT_TOPIC, CRONOS_ID_REGISTRY,
    CRONOS_MAINNET_CHAIN_ID, CRONOS_MAINNET_RPC_URL, DEFAULT_MINT_SCAN_START_BLOCK,
    DEFAULT_MINT_SCAN_WINDOW, DEFAULT_TLD, LABEL_SEPARATOR, REVERSE_SUFFIX,
};

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Network configuration
    pub network: NetworkConfig,

    /// Contract addresses by role
    pub contracts: ContractsConfig,

    /// Naming conventions
    #[serde(default)]
    pub naming: NamingSection,

    /// Mint scan configuration
    #[serde(default)]
    pub mints: MintsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// JSON-RPC URL
    pub rpc_url: String,

    /// Chain ID (25 for Cronos mainnet)
    pub chain_id: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Contract addresses configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractsConfig {
    /// Registry contract (`owner` / `resolver`)
    pub registry: Address,

    /// Storefront contract emitting mint events (optional, only for mint scans)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minting: Option<Address>,

    /// Topic0 of the mint event (required together with `minting`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mint_event_topic: Option<B256>,
}

/// Naming conventions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingSection {
    /// Top-level domain, without the leading dot
    #[serde(default = "default_tld")]
    pub tld: String,

    /// Reverse-lookup zone
    #[serde(default = "default_reverse_suffix")]
    pub reverse_suffix: String,
}

impl Default for NamingSection {
    fn default() -> Self {
        Self {
            tld: default_tld(),
            reverse_suffix: default_reverse_suffix(),
        }
    }
}

/// Mint scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintsConfig {
    /// First block to scan when none is given
    #[serde(default = "default_start_block")]
    pub start_block: u64,

    /// Blocks per log query
    #[serde(default = "default_window")]
    pub window: u64,
}

impl Default for MintsConfig {
    fn default() -> Self {
        Self {
            start_block: default_start_block(),
            window: default_window(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_request_timeout_secs() -> u64 {
    30
}

fn default_tld() -> String {
    DEFAULT_TLD.to_string()
}

fn default_reverse_suffix() -> String {
    REVERSE_SUFFIX.to_string()
}

fn default_start_block() -> u64 {
    DEFAULT_MINT_SCAN_START_BLOCK
}

fn default_window() -> u64 {
    DEFAULT_MINT_SCAN_WINDOW
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// The Cronos ID mainnet deployment.
    pub fn cronos_mainnet() -> Self {
        Self {
            network: NetworkConfig {
                rpc_url: CRONOS_MAINNET_RPC_URL.to_string(),
                chain_id: CRONOS_MAINNET_CHAIN_ID,
                request_timeout_secs: default_request_timeout_secs(),
            },
            contracts: ContractsConfig {
                registry: CRONOS_ID_REGISTRY,
                minting: Some(CRONOS_ID_MINTING_CONTRACT),
                mint_event_topic: Some(CRONOS_ID_MINT_EVENT_TOPIC),
            },
            naming: NamingSection::default(),
            mints: MintsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// Environment variables can be referenced using `${VAR_NAME}` syntax.
    /// For example: `rpc_url = "${CRONOS_RPC_URL}"`
    ///
    /// # Example
    /// ```no_run
    /// # use cronosid_resolver::config::Config;
    /// let config = Config::from_file("cronosid.toml")?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let expanded = Self::expand_env_vars(&contents)?;

        let config: Config = toml::from_str(&expanded)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml).context("Failed to parse TOML configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.network.rpc_url.trim().is_empty() {
            anyhow::bail!("Network RPC URL cannot be empty");
        }

        if self.network.chain_id == 0 {
            anyhow::bail!("Chain ID must be non-zero");
        }

        if self.network.request_timeout_secs == 0 {
            anyhow::bail!("Network request_timeout_secs must be > 0");
        }

        if self.contracts.registry.is_zero() {
            anyhow::bail!("Contracts registry must be a non-zero address");
        }

        match (self.contracts.minting, self.contracts.mint_event_topic) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("Contracts minting and mint_event_topic must be set together");
            }
            (Some(minting), Some(_)) if minting.is_zero() => {
                anyhow::bail!("Contracts minting must be a non-zero address when provided");
            }
            _ => {}
        }

        let tld = &self.naming.tld;
        if tld.is_empty() || tld.contains(LABEL_SEPARATOR) {
            anyhow::bail!(
                "Naming tld must be a single non-empty label (got '{}')",
                tld
            );
        }

        if self.naming.reverse_suffix.is_empty() {
            anyhow::bail!("Naming reverse_suffix cannot be empty");
        }

        if self.mints.window == 0 {
            anyhow::bail!("Mints window must be > 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Logging level must be one of: {} (got '{}')",
                valid_levels.join(", "),
                self.logging.level
            );
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!(
                "Logging format must be one of: {} (got '{}')",
                valid_formats.join(", "),
                self.logging.format
            );
        }

        Ok(())
    }

    /// Naming conventions for the resolution engine.
    pub fn naming_config(&self) -> NamingConfig {
        NamingConfig {
            registry: self.contracts.registry,
            tld: self.naming.tld.clone(),
            reverse_suffix: self.naming.reverse_suffix.clone(),
        }
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.network.request_timeout_secs)
    }

    /// Expand environment variables in the format `${VAR_NAME}`.
    ///
    /// Placeholders inside TOML comments are left alone; placeholders inside
    /// quoted strings are expanded.
    ///
    /// # Errors
    /// Returns an error if a referenced variable is unset, the name is empty,
    /// or the placeholder is not closed.
    fn expand_env_vars(input: &str) -> Result<String> {
        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();
        let mut in_double_quote = false;
        let mut in_single_quote = false;
        let mut in_comment = false;
        let mut escape_next = false;
        let mut line = 1;

        while let Some(ch) = chars.next() {
            if escape_next {
                escape_next = false;
                result.push(ch);
                continue;
            }

            match ch {
                '\\' if in_double_quote => {
                    escape_next = true;
                    result.push(ch);
                }
                '"' if !in_single_quote && !in_comment => {
                    in_double_quote = !in_double_quote;
                    result.push(ch);
                }
                '\'' if !in_double_quote && !in_comment => {
                    in_single_quote = !in_single_quote;
                    result.push(ch);
                }
                '#' if !in_double_quote && !in_single_quote => {
                    in_comment = true;
                    result.push(ch);
                }
                '\n' => {
                    // Comments end at the line; multi-line strings carry over
                    in_comment = false;
                    line += 1;
                    result.push(ch);
                }
                '$' if !in_comment && chars.peek() == Some(&'{') => {
                    chars.next();

                    let mut var_name = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        var_name.push(c);
                    }

                    if !closed {
                        anyhow::bail!(
                            "Unclosed environment variable placeholder on line {}",
                            line
                        );
                    }
                    if var_name.is_empty() {
                        anyhow::bail!("Empty environment variable name on line {}", line);
                    }

                    let value = std::env::var(&var_name).with_context(|| {
                        format!(
                            "Environment variable '{}' is not set (referenced on line {})",
                            var_name, line
                        )
                    })?;
                    result.push_str(&value);
                }
                _ => result.push(ch),
            }
        }

        Ok(result)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::cronos_mainnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
[network]
rpc_url = "https://evm.cronos.org"
chain_id = 25

[contracts]
registry = "0x7F4C61116729d5b27E5f180062Fdfbf32E9283E5"
"#;

    #[test]
    fn test_load_minimal_config_applies_defaults() {
        let config = Config::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.network.chain_id, 25);
        assert_eq!(config.network.request_timeout_secs, 30);
        assert_eq!(config.contracts.registry, CRONOS_ID_REGISTRY);
        assert_eq!(config.contracts.minting, None);
        assert_eq!(config.naming.tld, "cro");
        assert_eq!(config.naming.reverse_suffix, "addr.reverse");
        assert_eq!(config.mints.window, 2000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_mainnet_preset_is_valid() {
        let config = Config::cronos_mainnet();
        config.validate().unwrap();

        assert_eq!(config.network.rpc_url, "https://evm.cronos.org");
        assert_eq!(config.contracts.minting, Some(CRONOS_ID_MINTING_CONTRACT));
        assert_eq!(config.mints.start_block, 4_932_153);

        let naming = config.naming_config();
        assert_eq!(naming.registry, CRONOS_ID_REGISTRY);
        assert_eq!(naming.tld, "cro");
    }

    #[test]
    fn test_mainnet_preset_roundtrips_through_toml() {
        let serialized = toml::to_string(&Config::cronos_mainnet()).unwrap();
        let config = Config::from_toml_str(&serialized).unwrap();
        assert_eq!(
            config.contracts.mint_event_topic,
            Some(CRONOS_ID_MINT_EVENT_TOPIC)
        );
    }

    #[test]
    fn test_example_config_matches_mainnet() {
        let example = include_str!("../../../cronosid.toml.example");
        let config = Config::from_toml_str(example).unwrap();
        let mainnet = Config::cronos_mainnet();

        assert_eq!(config.network.rpc_url, mainnet.network.rpc_url);
        assert_eq!(config.contracts.registry, mainnet.contracts.registry);
        assert_eq!(config.contracts.minting, mainnet.contracts.minting);
        assert_eq!(
            config.contracts.mint_event_topic,
            mainnet.contracts.mint_event_topic
        );
        assert_eq!(config.mints.start_block, mainnet.mints.start_block);
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
[network]
rpc_url = "https://evm-t3.cronos.org"
chain_id = 338
request_timeout_secs = 10

[contracts]
registry = "0x1111111111111111111111111111111111111111"
minting = "0x2222222222222222222222222222222222222222"
mint_event_topic = "0x69e37f151eb98a09618ddaa80c8cfaf1ce5996867c489f45b555b412271ebf27"

[naming]
tld = "cro"

[mints]
start_block = 100
window = 500

[logging]
level = "debug"
format = "json"
"#;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.network.chain_id, 338);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.mints.start_block, 100);
        assert_eq!(config.mints.window, 500);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_validation_empty_rpc_url() {
        let toml = MINIMAL.replace("https://evm.cronos.org", "");
        let err = Config::from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("RPC URL"));
    }

    #[test]
    fn test_validation_zero_registry() {
        let toml = MINIMAL.replace(
            "0x7F4C61116729d5b27E5f180062Fdfbf32E9283E5",
            "0x0000000000000000000000000000000000000000",
        );
        let err = Config::from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("registry"));
    }

    #[test]
    fn test_validation_minting_requires_topic() {
        let toml = format!(
            "{}minting = \"0x2222222222222222222222222222222222222222\"\n",
            MINIMAL
        );
        let err = Config::from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("set together"));
    }

    #[test]
    fn test_validation_dotted_tld() {
        let toml = format!("{}\n[naming]\ntld = \"cro.eth\"\n", MINIMAL);
        let err = Config::from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("single non-empty label"));
    }

    #[test]
    fn test_validation_zero_window() {
        let toml = format!("{}\n[mints]\nwindow = 0\n", MINIMAL);
        let err = Config::from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("window"));
    }

    #[test]
    fn test_validation_bad_log_format() {
        let toml = format!("{}\n[logging]\nformat = \"xml\"\n", MINIMAL);
        let err = Config::from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("Logging format"));
    }

    #[test]
    fn test_expand_env_vars() {
        std::env::set_var("CRONOSID_TEST_VAR", "hello");
        let result = Config::expand_env_vars("value is ${CRONOSID_TEST_VAR}").unwrap();
        assert_eq!(result, "value is hello");
        std::env::remove_var("CRONOSID_TEST_VAR");

        let result = Config::expand_env_vars("no variables here").unwrap();
        assert_eq!(result, "no variables here");
    }

    #[test]
    fn test_expand_env_vars_errors() {
        let err = Config::expand_env_vars("x = ${CRONOSID_UNDEFINED_12345}").unwrap_err();
        assert!(err.to_string().contains("CRONOSID_UNDEFINED_12345"));

        let err = Config::expand_env_vars("x = ${}").unwrap_err();
        assert!(err.to_string().contains("Empty"));

        let err = Config::expand_env_vars("x = ${UNCLOSED").unwrap_err();
        assert!(err.to_string().contains("Unclosed"));
    }

    #[test]
    fn test_expand_env_vars_ignores_comments() {
        std::env::set_var("CRONOSID_TEST_KEY", "secret");

        let input = "# Example: ${CRONOSID_NOT_SET}\nkey = \"${CRONOSID_TEST_KEY}\"  # or ${OTHER}\n";
        let result = Config::expand_env_vars(input).unwrap();

        assert!(result.contains("secret"));
        assert!(result.contains("${CRONOSID_NOT_SET}"));
        assert!(result.contains("${OTHER}"));

        std::env::remove_var("CRONOSID_TEST_KEY");
    }

    #[test]
    fn test_expand_env_vars_hash_in_string() {
        let input = "url = \"https://example.com/#anchor\" # comment ${NOPE}\n";
        let result = Config::expand_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_config_from_file_with_env() {
        std::env::set_var("CRONOSID_TEST_RPC", "https://rpc.example.com");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
# rpc_url = "${{SOME_EXAMPLE}}"
[network]
rpc_url = "${{CRONOSID_TEST_RPC}}"
chain_id = 25

[contracts]
registry = "0x7F4C61116729d5b27E5f180062Fdfbf32E9283E5"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.network.rpc_url, "https://rpc.example.com");

        std::env::remove_var("CRONOSID_TEST_RPC");
    }

    #[test]
    fn test_config_from_missing_file() {
        let err = Config::from_file("/nonexistent/cronosid.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
