use std::path::Path;

use anyhow::{Context, Result};
use brandvoice_core::adjust::Adjustment;
use clap::Args;

use crate::output::format::{format_adjustments, format_profile};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct AdjustArgs {
    /// Profile field path, e.g. formality.level or communication_style.cta_style
    pub path: Option<String>,

    /// New value: a level, a JSON list or comma-separated terms, or free text
    #[arg(conflicts_with = "clear")]
    pub value: Option<String>,

    /// Remove the hand edit of PATH
    #[arg(long, requires = "path")]
    pub clear: bool,

    /// Remove every hand edit
    #[arg(long, conflicts_with_all = ["path", "clear"])]
    pub clear_all: bool,
}

pub fn run(args: &AdjustArgs, home: Option<&Path>, format: OutputFormat) -> Result<()> {
    let storage = super::open_storage(home)?;

    if args.clear_all {
        let count = storage
            .update(|session| session.clear_adjustments())
            .context("Failed to update session")?;
        println!("Cleared {count} adjustment(s).");
        return Ok(());
    }

    let Some(path) = args.path.as_deref() else {
        let session = storage.load().context("Failed to load session")?;
        println!("{}", format_adjustments(&session.adjustments(), format));
        return Ok(());
    };

    if args.clear {
        let removed = storage
            .update(|session| session.clear_adjustment(path))
            .context("Failed to update session")?;
        if removed {
            println!("Cleared adjustment of {path}.");
        } else {
            println!("No adjustment of {path}.");
        }
        return Ok(());
    }

    let Some(raw) = args.value.as_deref() else {
        let session = storage.load().context("Failed to load session")?;
        match session.adjustments().get(path) {
            Some(adjustment) => println!("{path} = {}", serde_json::to_string(adjustment)?),
            None => println!("No adjustment of {path}."),
        }
        return Ok(());
    };

    let adjustment = Adjustment::parse(path, raw)?;
    let profile = storage
        .update(|session| session.adjust(path, adjustment))
        .context("Failed to update session")??;

    println!("{}", format_profile(&profile, format));
    Ok(())
}
