use std::path::Path;

use anyhow::{Context, Result};

use crate::output::format::format_profile;
use crate::output::OutputFormat;

pub fn run(home: Option<&Path>, format: OutputFormat) -> Result<()> {
    let storage = super::open_storage(home)?;
    let session = storage.load().context("Failed to load session")?;

    println!("{}", format_profile(&session.get_profile(), format));
    Ok(())
}
