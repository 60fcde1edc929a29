//! Resolution engine.
//!
//! Stateless request/response over a [`ChainGateway`]: every call recomputes from chain
//! state, nothing is cached and nothing is retried.

use alloy::primitives::{hex, Address};
use serde::Serialize;

use crate::contracts::{call_view, try_call_view, ENSRegistry, NameResolver};
use crate::error::{NoReverseCause, ResolveError, Result};
use crate::gateway::ChainGateway;
use cronosid_core::{domain_name, namehash, AddressKind, Node, DEFAULT_TLD, REVERSE_SUFFIX};

/// Which registry deployment and naming conventions to resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConfig {
    /// Registry contract address.
    pub registry: Address,
    /// Top-level domain appended to bare labels.
    pub tld: String,
    /// Reverse-lookup zone.
    pub reverse_suffix: String,
}

impl NamingConfig {
    /// Default conventions (`.cro`, `addr.reverse`) for a registry.
    pub fn new(registry: Address) -> Self {
        Self {
            registry,
            tld: DEFAULT_TLD.to_string(),
            reverse_suffix: REVERSE_SUFFIX.to_string(),
        }
    }

    /// Reverse-lookup name for an address under the configured zone.
    pub fn reverse_name(&self, address: &Address) -> String {
        domain_name(&hex::encode(address), &self.reverse_suffix)
    }
}

/// A reverse claim that survived the forward re-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedName {
    /// Address whose reverse record was read.
    pub address: Address,
    /// Full name (including the TLD) it claims and owns.
    pub name: String,
}

/// Forward / reverse resolution and address classification.
pub struct ResolutionEngine<G> {
    gateway: G,
    naming: NamingConfig,
}

impl<G: ChainGateway> ResolutionEngine<G> {
    /// Create an engine over a gateway.
    pub fn new(gateway: G, naming: NamingConfig) -> Self {
        Self { gateway, naming }
    }

    /// The underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The naming conventions in use.
    pub fn naming(&self) -> &NamingConfig {
        &self.naming
    }

    /// Owner of `label.<tld>`, e.g. `"alice"` → owner of `alice.cro`.
    ///
    /// The registry's answer is returned verbatim: an unregistered name yields the zero
    /// address, not an error.
    pub async fn forward_resolve(&self, label: &str) -> Result<Address> {
        self.forward_resolve_name(&domain_name(label, &self.naming.tld))
            .await
    }

    /// Owner of a full name that already carries its suffix.
    pub async fn forward_resolve_name(&self, name: &str) -> Result<Address> {
        let node = namehash(name)?;
        self.owner_of_node(node).await
    }

    /// Like [`forward_resolve`](Self::forward_resolve), but an unregistered name is
    /// reported as [`ResolveError::UnresolvedName`].
    pub async fn require_owner(&self, label: &str) -> Result<Address> {
        let name = domain_name(label, &self.naming.tld);
        let owner = self.forward_resolve_name(&name).await?;
        if owner.is_zero() {
            return Err(ResolveError::UnresolvedName(name));
        }
        Ok(owner)
    }

    /// Name claimed by the reverse record of `address`.
    ///
    /// Two hops: the registry's resolver for `<hex>.addr.reverse`, then that resolver's
    /// `name`. The answer is a claim only; use [`verify_reverse`](Self::verify_reverse)
    /// before treating it as proof of ownership.
    pub async fn reverse_resolve(&self, address: Address) -> Result<String> {
        let node = namehash(&self.naming.reverse_name(&address))?;

        let resolver = call_view(
            &self.gateway,
            self.naming.registry,
            &ENSRegistry::resolverCall {
                node: node.into_inner(),
            },
        )
        .await?
        ._0;

        if resolver.is_zero() {
            return Err(ResolveError::NoReverseRecord {
                address,
                cause: NoReverseCause::NoResolver,
            });
        }

        let name = try_call_view(
            &self.gateway,
            resolver,
            &NameResolver::nameCall {
                node: node.into_inner(),
            },
        )
        .await?
        .ok_or(ResolveError::NoReverseRecord {
            address,
            cause: NoReverseCause::EmptyResponse,
        })?
        ._0;

        if name.is_empty() {
            return Err(ResolveError::NoReverseRecord {
                address,
                cause: NoReverseCause::EmptyName,
            });
        }

        Ok(name)
    }

    /// Reverse-resolve `address`, then confirm the claimed name resolves forward to it.
    ///
    /// Address comparison is byte-wise, i.e. case-insensitive on the hex form.
    pub async fn verify_reverse(&self, address: Address) -> Result<VerifiedName> {
        let name = self.reverse_resolve(address).await?;
        let actual = self.forward_resolve_name(&name).await?;

        if actual != address {
            return Err(ResolveError::OwnershipMismatch {
                name,
                expected: address,
                actual,
            });
        }

        Ok(VerifiedName { address, name })
    }

    /// Whether `address` is a key-controlled account or a contract.
    pub async fn classify_address(&self, address: Address) -> Result<AddressKind> {
        let code = self.gateway.get_code(address).await?;
        Ok(AddressKind::from_code(&code))
    }

    /// Owner of a raw registry node, for callers that only hold the hash.
    pub async fn owner_of_node(&self, node: Node) -> Result<Address> {
        let ret = call_view(
            &self.gateway,
            self.naming.registry,
            &ENSRegistry::ownerCall {
                node: node.into_inner(),
            },
        )
        .await?;
        Ok(ret._0)
    }
}
