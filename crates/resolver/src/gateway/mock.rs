//! In-memory chain gateway.
//!
//! Implements the registry and name-resolver contract semantics on plain maps so that
//! resolution can be driven without a node:
//! - `owner` / `resolver` return the zero address for unknown nodes
//! - `name` returns the empty string for unknown nodes
//! - calls to an address with no code return empty data, as a real node does
//!
//! Every `eth_call` is recorded in order, which lets tests assert hop sequencing.

use std::collections::HashMap;

use alloy::primitives::{Address, Bytes, B256};
use alloy::sol_types::{SolCall, SolInterface, SolValue};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use super::{ChainGateway, LogEntry, LogQuery};
use crate::contracts::{ENSRegistry, NameResolver};
use crate::error::GatewayError;
use cronosid_core::{namehash, namehash_normalized, reverse_name, Node};

/// Placeholder bytecode given to contracts the mock manages.
const CONTRACT_STUB_CODE: [u8; 1] = [0xfe];

/// An `eth_call` observed by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedCall {
    /// Target contract.
    pub to: Address,
    /// First four bytes of the calldata.
    pub selector: [u8; 4],
}

#[derive(Debug, Default)]
struct ChainState {
    owners: HashMap<B256, Address>,
    resolvers: HashMap<B256, Address>,
    names: HashMap<(Address, B256), String>,
    code: HashMap<Address, Bytes>,
    raw_responses: HashMap<Address, Bytes>,
    logs: Vec<LogEntry>,
}

/// In-memory chain with a single registry deployment.
#[derive(Debug)]
pub struct MockGateway {
    registry: Address,
    state: RwLock<ChainState>,
    calls: Mutex<Vec<RecordedCall>>,
    failure: Mutex<Option<GatewayError>>,
}

impl MockGateway {
    /// Create an empty chain with a registry deployed at `registry`.
    pub fn new(registry: Address) -> Self {
        let mut state = ChainState::default();
        state
            .code
            .insert(registry, Bytes::from_static(&CONTRACT_STUB_CODE));

        Self {
            registry,
            state: RwLock::new(state),
            calls: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// The registry address this chain was created with.
    pub fn registry(&self) -> Address {
        self.registry
    }

    /// Set the registry owner of `node`.
    pub fn set_owner(&self, node: Node, owner: Address) {
        self.state.write().owners.insert(node.into_inner(), owner);
    }

    /// Set the registry resolver of `node`, deploying stub code at the resolver.
    pub fn set_resolver(&self, node: Node, resolver: Address) {
        let mut state = self.state.write();
        state.resolvers.insert(node.into_inner(), resolver);
        if !resolver.is_zero() {
            state
                .code
                .entry(resolver)
                .or_insert_with(|| Bytes::from_static(&CONTRACT_STUB_CODE));
        }
    }

    /// Set the name a resolver returns for `node`.
    pub fn set_name(&self, resolver: Address, node: Node, name: &str) {
        self.state
            .write()
            .names
            .insert((resolver, node.into_inner()), name.to_string());
    }

    /// Register a full name (e.g. `alice.cro`) to `owner`. Returns its node.
    pub fn register(&self, name: &str, owner: Address) -> cronosid_core::Result<Node> {
        let node = namehash(name)?;
        self.set_owner(node, owner);
        Ok(node)
    }

    /// Point the reverse record of `address` at `name`, served by `resolver`.
    pub fn set_reverse(&self, address: Address, resolver: Address, name: &str) -> Node {
        // Reverse names are lowercase hex plus ASCII, already normalized.
        let node = namehash_normalized(&reverse_name(&address));
        self.set_resolver(node, resolver);
        self.set_name(resolver, node, name);
        node
    }

    /// Deploy bytecode at `address`.
    pub fn set_code(&self, address: Address, code: impl Into<Bytes>) {
        self.state.write().code.insert(address, code.into());
    }

    /// Answer every `eth_call` to `address` with `output`, bypassing ABI handling.
    pub fn set_raw_response(&self, address: Address, output: impl Into<Bytes>) {
        self.state
            .write()
            .raw_responses
            .insert(address, output.into());
    }

    /// Append an emitted log.
    pub fn push_log(&self, entry: LogEntry) {
        self.state.write().logs.push(entry);
    }

    /// Make every subsequent query fail with `error`.
    pub fn fail_with(&self, error: GatewayError) {
        *self.failure.lock() = Some(error);
    }

    /// Stop failing queries.
    pub fn clear_failure(&self) {
        *self.failure.lock() = None;
    }

    /// `eth_call`s observed so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    fn check_failure(&self) -> Result<(), GatewayError> {
        match self.failure.lock().as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn registry_call(&self, input: &[u8]) -> Result<Bytes, GatewayError> {
        let state = self.state.read();
        let output = match ENSRegistry::ENSRegistryCalls::abi_decode(input, true) {
            Ok(ENSRegistry::ENSRegistryCalls::owner(call)) => state
                .owners
                .get(&call.node)
                .copied()
                .unwrap_or(Address::ZERO)
                .abi_encode(),
            Ok(ENSRegistry::ENSRegistryCalls::resolver(call)) => state
                .resolvers
                .get(&call.node)
                .copied()
                .unwrap_or(Address::ZERO)
                .abi_encode(),
            Err(_) => return Err(reverted()),
        };
        Ok(Bytes::from(output))
    }

    fn resolver_call(&self, to: Address, input: &[u8]) -> Result<Bytes, GatewayError> {
        let call = NameResolver::nameCall::abi_decode(input, true).map_err(|_| reverted())?;
        let name = self
            .state
            .read()
            .names
            .get(&(to, call.node))
            .cloned()
            .unwrap_or_default();
        Ok(Bytes::from(name.abi_encode()))
    }
}

fn reverted() -> GatewayError {
    GatewayError::Transport {
        method: "eth_call",
        message: "execution reverted".to_string(),
    }
}

#[async_trait]
impl ChainGateway for MockGateway {
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, GatewayError> {
        self.check_failure()?;

        let mut selector = [0u8; 4];
        if input.len() >= 4 {
            selector.copy_from_slice(&input[..4]);
        }
        self.calls.lock().push(RecordedCall { to, selector });

        {
            let state = self.state.read();
            if state.code.get(&to).map_or(true, |code| code.is_empty()) {
                return Ok(Bytes::new());
            }
            if let Some(output) = state.raw_responses.get(&to) {
                return Ok(output.clone());
            }
        }

        if to == self.registry {
            self.registry_call(&input)
        } else {
            self.resolver_call(to, &input)
        }
    }

    async fn get_code(&self, address: Address) -> Result<Bytes, GatewayError> {
        self.check_failure()?;

        Ok(self
            .state
            .read()
            .code
            .get(&address)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>, GatewayError> {
        self.check_failure()?;

        Ok(self
            .state
            .read()
            .logs
            .iter()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect())
    }
}
