//! Mint event scanning.
//!
//! Lists the domains minted by the storefront contract over a block range. The event
//! payload is read at a fixed position: the label is the sixth 32-byte word of the log
//! data, NUL-padded on the right.

use alloy::primitives::{Address, B256};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::gateway::{ChainGateway, LogEntry, LogQuery};
use cronosid_core::domain_name;

/// Index of the data word holding the minted label.
const LABEL_WORD_INDEX: usize = 5;

/// ABI word size.
const WORD_SIZE: usize = 32;

/// A domain seen in a mint event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintedDomain {
    /// Block the mint was included in.
    pub block_number: u64,
    /// Minted label, without the TLD.
    pub label: String,
    /// Full domain (`label.tld`).
    pub domain: String,
    /// Minting transaction, when the node reports it.
    pub transaction_hash: Option<B256>,
}

/// Scans mint events of one storefront contract.
pub struct MintScanner<G> {
    gateway: G,
    contract: Address,
    event_topic: B256,
    tld: String,
}

impl<G: ChainGateway> MintScanner<G> {
    /// Create a scanner.
    pub fn new(gateway: G, contract: Address, event_topic: B256, tld: impl Into<String>) -> Self {
        Self {
            gateway,
            contract,
            event_topic,
            tld: tld.into(),
        }
    }

    /// Domains minted in `from..=to` using a single log query.
    ///
    /// Logs whose payload cannot be decoded are skipped with a warning.
    pub async fn list_minted(&self, from: u64, to: u64) -> Result<Vec<MintedDomain>> {
        let query = LogQuery::event(self.contract, self.event_topic, from, to);
        let logs = self.gateway.get_logs(&query).await?;

        let mut minted = Vec::with_capacity(logs.len());
        for log in &logs {
            match self.to_minted(log) {
                Some(domain) => minted.push(domain),
                None => warn!(
                    "Skipping undecodable mint event (block {:?}, tx {:?})",
                    log.block_number, log.transaction_hash
                ),
            }
        }

        Ok(minted)
    }

    /// Domains minted in `from..=to`, queried `window` blocks at a time.
    ///
    /// A `window` of zero is treated as one block per query.
    pub async fn scan(&self, from: u64, to: u64, window: u64) -> Result<Vec<MintedDomain>> {
        let window = window.max(1);
        let mut minted = Vec::new();
        let mut start = from;

        while start <= to {
            let end = start.saturating_add(window - 1).min(to);
            let batch = self.list_minted(start, end).await?;
            info!(
                "Mint scan: blocks {} to {}: {} domains",
                start,
                end,
                batch.len()
            );
            minted.extend(batch);

            if end == u64::MAX {
                break;
            }
            start = end + 1;
        }

        Ok(minted)
    }

    fn to_minted(&self, log: &LogEntry) -> Option<MintedDomain> {
        let block_number = log.block_number?;
        let label = decode_minted_label(&log.data)?;

        Some(MintedDomain {
            block_number,
            domain: domain_name(&label, &self.tld),
            label,
            transaction_hash: log.transaction_hash,
        })
    }
}

/// Extract the label from a mint event payload.
///
/// Returns `None` if the payload is too short, the word is empty, or it is not UTF-8.
pub fn decode_minted_label(data: &[u8]) -> Option<String> {
    let start = LABEL_WORD_INDEX * WORD_SIZE;
    let word = data.get(start..start + WORD_SIZE)?;

    let end = word.iter().rposition(|b| *b != 0)? + 1;
    String::from_utf8(word[..end].to_vec()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GatewayError, ResolveError};
    use crate::gateway::MockGateway;
    use alloy::primitives::Bytes;

    const MINTER: Address = Address::new([0xaa; 20]);
    const TOPIC: B256 = B256::new([0x69; 32]);

    fn payload(label: &str) -> Bytes {
        let mut data = vec![0u8; 7 * WORD_SIZE];
        let start = LABEL_WORD_INDEX * WORD_SIZE;
        data[start..start + label.len()].copy_from_slice(label.as_bytes());
        Bytes::from(data)
    }

    fn mint_log(block: u64, label: &str) -> LogEntry {
        LogEntry {
            address: MINTER,
            topics: vec![TOPIC],
            data: payload(label),
            block_number: Some(block),
            transaction_hash: Some(B256::repeat_byte(block as u8)),
        }
    }

    fn scanner(chain: MockGateway) -> MintScanner<MockGateway> {
        MintScanner::new(chain, MINTER, TOPIC, "cro")
    }

    #[test]
    fn test_decode_minted_label() {
        assert_eq!(
            decode_minted_label(&payload("web3developer")),
            Some("web3developer".to_string())
        );
        assert_eq!(decode_minted_label(&payload("")), None);
        assert_eq!(decode_minted_label(&[0u8; 100]), None);

        let mut invalid = payload("ok").to_vec();
        invalid[LABEL_WORD_INDEX * WORD_SIZE] = 0xff;
        assert_eq!(decode_minted_label(&invalid), None);
    }

    #[tokio::test]
    async fn test_list_minted_filters_and_decodes() {
        let chain = MockGateway::new(Address::ZERO);
        chain.push_log(mint_log(100, "alice"));
        chain.push_log(mint_log(150, "bob"));
        chain.push_log(mint_log(300, "carol"));

        let mut foreign = mint_log(120, "mallory");
        foreign.address = Address::repeat_byte(0xbb);
        chain.push_log(foreign);

        let minted = scanner(chain).list_minted(100, 200).await.unwrap();
        let domains: Vec<_> = minted.iter().map(|m| m.domain.as_str()).collect();
        assert_eq!(domains, vec!["alice.cro", "bob.cro"]);
        assert_eq!(minted[0].block_number, 100);
        assert_eq!(minted[0].label, "alice");
    }

    #[tokio::test]
    async fn test_list_minted_skips_undecodable() {
        let chain = MockGateway::new(Address::ZERO);
        chain.push_log(mint_log(10, "alice"));
        let mut short = mint_log(11, "x");
        short.data = Bytes::from_static(&[1, 2, 3]);
        chain.push_log(short);

        let minted = scanner(chain).list_minted(0, 20).await.unwrap();
        assert_eq!(minted.len(), 1);
        assert_eq!(minted[0].label, "alice");
    }

    #[tokio::test]
    async fn test_scan_windows_cover_range_once() {
        let chain = MockGateway::new(Address::ZERO);
        for (block, label) in [(0, "a"), (9, "b"), (10, "c"), (25, "d"), (26, "e")] {
            chain.push_log(mint_log(block, label));
        }

        let minted = scanner(chain).scan(0, 25, 10).await.unwrap();
        let labels: Vec<_> = minted.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_scan_propagates_gateway_error() {
        let chain = MockGateway::new(Address::ZERO);
        chain.fail_with(GatewayError::Transport {
            method: "eth_getLogs",
            message: "block range too large".to_string(),
        });

        let err = scanner(chain).scan(0, 5000, 2000).await.unwrap_err();
        assert!(matches!(err, ResolveError::ChainQuery(_)));
    }
}
