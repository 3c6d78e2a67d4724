use std::path::Path;

use anyhow::{Context, Result};

use crate::output::format::format_report;
use crate::output::OutputFormat;

pub fn run(home: Option<&Path>, format: OutputFormat) -> Result<()> {
    let storage = super::open_storage(home)?;
    let session = storage.load().context("Failed to load session")?;

    println!("{}", format_report(&session.explain(), format));
    Ok(())
}
