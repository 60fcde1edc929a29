//! End-to-end tour: mints, forward, classify, reverse, verify.

use alloy::primitives::Address;
use anyhow::Result;
use cronosid_core::{domain_name, AddressKind};
use cronosid_resolver::{MintedDomain, ResolveError};
use serde::Serialize;

use super::mints::print_minted;
use super::resolve::describe;
use super::Context;

#[derive(Debug, Default, Serialize)]
struct WalkthroughOutput {
    minted: Vec<MintedDomain>,
    domain: String,
    owner: Option<Address>,
    kind: Option<AddressKind>,
    reverse_name: Option<String>,
    verified_owner: Option<Address>,
    verified: bool,
}

pub async fn run(ctx: &Context, label: &str) -> Result<()> {
    let gateway = ctx.connect().await?;
    let mut out = WalkthroughOutput {
        domain: domain_name(label, &ctx.config.naming.tld),
        ..Default::default()
    };

    // 1. Recent mints, one window from the configured start block
    let from = ctx.config.mints.start_block;
    let to = from.saturating_add(ctx.config.mints.window);
    say(ctx, format!("Domains minted in blocks {} to {}:", from, to));
    match ctx.scanner(gateway.clone()) {
        Ok(scanner) => {
            out.minted = scanner.list_minted(from, to).await?;
            if !ctx.json {
                print_minted(&out.minted);
            }
        }
        Err(err) => say(ctx, format!("Skipping mint scan: {}", err)),
    }

    let engine = ctx.engine(gateway);

    // 2. Forward resolution
    let owner = engine.forward_resolve(label).await?;
    if owner.is_zero() {
        say(ctx, format!("{} is unregistered", out.domain));
        return finish(ctx, &out);
    }
    out.owner = Some(owner);
    say(ctx, format!("The owner of {} is {}", out.domain, owner));

    // 3. Classification
    let kind = engine.classify_address(owner).await?;
    out.kind = Some(kind);
    say(ctx, format!("{}: {}", owner, describe(kind)));

    // 4. Reverse resolution (a claim)
    let claimed = match engine.reverse_resolve(owner).await {
        Ok(name) => name,
        Err(err) if err.is_negative_result() => {
            say(ctx, err.to_string());
            return finish(ctx, &out);
        }
        Err(err) => return Err(err.into()),
    };
    say(ctx, format!("The reverse record of {} claims {}", owner, claimed));
    out.reverse_name = Some(claimed.clone());

    // 5. Forward re-check of the claim
    let actual = engine.forward_resolve_name(&claimed).await?;
    out.verified_owner = Some(actual);
    out.verified = actual == owner;
    finish(ctx, &out)?;

    if !out.verified {
        return Err(ResolveError::OwnershipMismatch {
            name: claimed,
            expected: owner,
            actual,
        }
        .into());
    }

    say(
        ctx,
        format!("Verified: {} is indeed the owner of {}", owner, claimed),
    );
    Ok(())
}

fn say(ctx: &Context, line: String) {
    if !ctx.json {
        println!("{}", line);
    }
}

fn finish(ctx: &Context, out: &WalkthroughOutput) -> Result<()> {
    ctx.emit(out, || {})
}
