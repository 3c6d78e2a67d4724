use std::path::Path;

use anyhow::{Context, Result};

pub fn run(home: Option<&Path>) -> Result<()> {
    let storage = super::open_storage(home)?;
    storage.reset().context("Failed to reset session")?;

    println!("Session reset. The profile is back to its defaults.");
    Ok(())
}
