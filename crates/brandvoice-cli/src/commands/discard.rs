use std::path::Path;

use anyhow::{Context, Result};
use brandvoice_core::model::Method;
use clap::Args;

#[derive(Args)]
pub struct DiscardArgs {
    /// Input method whose parameters to drop
    pub method: Method,
}

pub fn run(args: &DiscardArgs, home: Option<&Path>) -> Result<()> {
    let storage = super::open_storage(home)?;
    let removed = storage
        .update(|session| session.discard(args.method))
        .context("Failed to update session")?;

    if removed {
        println!("Discarded {} parameters.", args.method);
    } else {
        println!("Nothing stored for {}.", args.method);
    }
    Ok(())
}
