use alloy::primitives::Address;
use anyhow::{Context as _, Result};
use cronosid_core::{domain_name, namehash, strip_tld, AddressKind, Node};
use cronosid_resolver::ResolveError;
use serde::Serialize;

use super::Context;

#[derive(Debug, Serialize)]
struct OwnerOutput {
    domain: Option<String>,
    node: Node,
    owner: Option<Address>,
}

#[derive(Debug, Serialize)]
struct ReverseOutput {
    address: Address,
    name: Option<String>,
    verified: bool,
}

#[derive(Debug, Serialize)]
struct ClassifyOutput {
    address: Address,
    kind: AddressKind,
    portable: bool,
}

pub async fn run_owner(ctx: &Context, label: &str) -> Result<()> {
    let tld = &ctx.config.naming.tld;
    let label = strip_tld(label, tld).unwrap_or(label);
    let domain = domain_name(label, tld);

    let node = namehash(&domain)?;

    let engine = ctx.engine(ctx.connect().await?);
    let owner = engine.forward_resolve(label).await?;

    print_owner(ctx, Some(domain), node, owner)
}

pub async fn run_owner_node(ctx: &Context, node: Node) -> Result<()> {
    let engine = ctx.engine(ctx.connect().await?);
    let owner = engine.owner_of_node(node).await?;

    print_owner(ctx, None, node, owner)
}

fn print_owner(ctx: &Context, domain: Option<String>, node: Node, owner: Address) -> Result<()> {
    let output = OwnerOutput {
        domain,
        node,
        owner: (!owner.is_zero()).then_some(owner),
    };
    let subject = output
        .domain
        .clone()
        .unwrap_or_else(|| format!("Node {}", output.node));

    ctx.emit(&output, || match output.owner {
        Some(owner) => println!("{} is owned by {}", subject, owner),
        None => println!("{} is unregistered", subject),
    })
}

pub async fn run_reverse(ctx: &Context, address: Address, unverified: bool) -> Result<()> {
    let engine = ctx.engine(ctx.connect().await?);

    let result = if unverified {
        engine.reverse_resolve(address).await
    } else {
        engine
            .verify_reverse(address)
            .await
            .map(|verified| verified.name)
    };

    let name = match result {
        Ok(name) => Some(name),
        Err(err) if err.is_negative_result() => {
            if !ctx.json {
                println!("{}", err);
            }
            None
        }
        Err(err @ ResolveError::OwnershipMismatch { .. }) => {
            return Err(err).context("Reverse record failed forward verification");
        }
        Err(err) => return Err(err.into()),
    };

    let output = ReverseOutput {
        address,
        verified: name.is_some() && !unverified,
        name,
    };

    ctx.emit(&output, || {
        if let Some(name) = &output.name {
            if output.verified {
                println!("{} is {} (verified)", output.address, name);
            } else {
                println!(
                    "{} claims {} (unverified, do not treat as ownership)",
                    output.address, name
                );
            }
        }
    })
}

pub async fn run_classify(ctx: &Context, address: Address) -> Result<()> {
    let engine = ctx.engine(ctx.connect().await?);
    let kind = engine.classify_address(address).await?;

    let output = ClassifyOutput {
        address,
        kind,
        portable: kind.is_portable(),
    };

    ctx.emit(&output, || {
        println!("{}: {}", output.address, describe(output.kind));
    })
}

/// Human-readable classification with the cross-chain advisory.
pub fn describe(kind: AddressKind) -> &'static str {
    match kind {
        AddressKind::ExternallyOwned => {
            "EOA, its owner controls the same address on every EVM chain"
        }
        AddressKind::Contract => {
            "smart contract, it may not exist at this address on other EVM chains"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_output_json() {
        let output = ClassifyOutput {
            address: Address::ZERO,
            kind: AddressKind::Contract,
            portable: false,
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["kind"], "contract");
        assert_eq!(json["portable"], false);
    }

    #[test]
    fn test_unregistered_owner_serializes_as_null() {
        let output = OwnerOutput {
            domain: Some("nobody.cro".to_string()),
            node: namehash("nobody.cro").unwrap(),
            owner: None,
        };
        let json = serde_json::to_value(&output).unwrap();
        assert!(json["owner"].is_null());
        assert_eq!(json["node"], output.node.to_string());
    }

    #[test]
    fn test_describe_mentions_portability() {
        assert!(describe(AddressKind::ExternallyOwned).contains("every EVM chain"));
        assert!(describe(AddressKind::Contract).contains("may not exist"));
    }
}
