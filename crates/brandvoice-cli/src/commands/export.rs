use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

#[derive(Args)]
pub struct ExportArgs {
    /// Output file (default: brand_voice_parameters_<timestamp>.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ExportArgs, home: Option<&Path>) -> Result<()> {
    let storage = super::open_storage(home)?;
    let session = storage.load().context("Failed to load session")?;

    let path = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "brand_voice_parameters_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        ))
    });

    let json = serde_json::to_string_pretty(&session.get_profile())
        .context("Failed to serialize profile")?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Exported brand voice profile to {}", path.display());
    Ok(())
}
