use anyhow::Result;
use cronosid_resolver::MintedDomain;
use tracing::info;

use super::Context;

pub async fn run(ctx: &Context, from: Option<u64>, to: Option<u64>) -> Result<()> {
    let gateway = ctx.connect().await?;

    let from = from.unwrap_or(ctx.config.mints.start_block);
    let to = match to {
        Some(to) => to,
        None => default_to(from, ctx.config.mints.window, gateway.block_number().await?),
    };
    if from > to {
        anyhow::bail!("Invalid block range: {} > {}", from, to);
    }

    info!("Scanning mint events in blocks {} to {}", from, to);

    let scanner = ctx.scanner(gateway)?;
    let minted = scanner.scan(from, to, ctx.config.mints.window).await?;

    ctx.emit(&minted, || print_minted(&minted))
}

/// Without `--to`, scan one window from `from`, never past the chain head.
fn default_to(from: u64, window: u64, latest: u64) -> u64 {
    from.saturating_add(window).min(latest)
}

pub fn print_minted(minted: &[MintedDomain]) {
    if minted.is_empty() {
        println!("No domains minted in this range");
    }
    for domain in minted {
        println!(
            "At block {} this domain was minted: {}",
            domain.block_number, domain.domain
        );
    }
}
