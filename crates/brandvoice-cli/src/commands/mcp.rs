use std::path::Path;

use anyhow::{Context, Result};

pub fn run(home: Option<&Path>) -> Result<()> {
    let storage = super::open_storage(home)?;
    let home = storage.home().to_path_buf();

    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    rt.block_on(async {
        brandvoice_mcp::run_stdio(home)
            .await
            .map_err(|e| anyhow::anyhow!("MCP server error: {e}"))
    })
}
