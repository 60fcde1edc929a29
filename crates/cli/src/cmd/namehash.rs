use anyhow::Result;
use cronosid_core::{namehash, normalize};
use serde::Serialize;

use super::Context;

#[derive(Debug, Serialize)]
struct NamehashOutput {
    name: String,
    normalized: String,
    node: String,
}

pub fn run(ctx: &Context, name: &str) -> Result<()> {
    let normalized = normalize(name)?;
    let node = namehash(name)?;

    let output = NamehashOutput {
        name: name.to_string(),
        normalized,
        node: node.to_string(),
    };

    ctx.emit(&output, || {
        if output.normalized != output.name {
            println!("normalized: {}", output.normalized);
        }
        println!("{}", output.node);
    })
}
