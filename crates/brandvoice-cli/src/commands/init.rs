use std::path::Path;

use anyhow::{Context, Result};
use brandvoice_core::storage::{SessionStorage, HOME_DIR};
use clap::Args;

#[derive(Args)]
pub struct InitArgs {
    /// Replace an existing session with a fresh one
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs, home: Option<&Path>) -> Result<()> {
    let home = match home {
        Some(home) => home.to_path_buf(),
        None => std::env::current_dir()
            .context("Failed to read current directory")?
            .join(HOME_DIR),
    };
    let storage = SessionStorage::open(home);

    if storage.is_initialized() && !args.force {
        println!(
            "Brand voice is already initialized in {}.",
            storage.home().display()
        );
        println!("Use --force to start a fresh session.");
        return Ok(());
    }

    let session = storage
        .init()
        .context("Failed to initialize brand voice home")?;

    println!(
        "Brand voice initialized in {} (session {}).",
        storage.home().display(),
        session.id().short()
    );
    println!();
    println!("Next steps:");
    println!("  brandvoice analyze <docs>                Analyze brand documents");
    println!("  brandvoice interview --answers <file>    Commit interview answers");
    println!("  brandvoice commit web_scraper --file <f> Commit a website analysis");
    println!("  brandvoice show                          Show the merged profile");
    Ok(())
}
