use std::path::Path;

use anyhow::{Context, Result};

use crate::output::OutputFormat;

pub fn run(home: Option<&Path>, format: OutputFormat) -> Result<()> {
    let storage = super::open_storage(home)?;
    let session = storage.load().context("Failed to load session")?;
    let copy = session.render_example_copy();

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "example_copy": copy }))
                .unwrap_or_default()
        ),
        OutputFormat::Text | OutputFormat::Markdown => println!("{copy}"),
    }
    Ok(())
}
