pub mod adjust;
pub mod analyze;
pub mod commit;
pub mod discard;
pub mod example;
pub mod explain;
pub mod export;
pub mod init;
pub mod interview;
pub mod mcp;
pub mod reset;
pub mod show;
pub mod status;
pub mod version;

use std::path::Path;

use anyhow::{Context, Result};
use brandvoice_core::storage::SessionStorage;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Create a brand voice home with a fresh session
    Init(init::InitArgs),
    /// Commit a partial parameter set for one input method
    Commit(commit::CommitArgs),
    /// Analyze documents with the keyword analyzer and commit the result
    Analyze(analyze::AnalyzeArgs),
    /// Show the interview questionnaire or commit interview answers
    Interview(interview::InterviewArgs),
    /// Show the canonical brand voice profile
    Show,
    /// Show which input methods have been completed
    Status,
    /// Explain how each profile field was merged
    Explain,
    /// Print example marketing copy in the current brand voice
    Example,
    /// Export the profile as a JSON document
    Export(export::ExportArgs),
    /// Pin a profile field to a hand-chosen value, or list and clear hand edits
    Adjust(adjust::AdjustArgs),
    /// Drop one method's parameters while keeping it marked as completed
    Discard(discard::DiscardArgs),
    /// Clear every method and return to the default profile
    Reset,
    /// Serve the profile to agents over MCP (stdio)
    Mcp,
    /// Print version information
    Version,
}

/// Resolve the brand voice home and make sure it has been initialized.
pub fn open_storage(home: Option<&Path>) -> Result<SessionStorage> {
    let storage = match home {
        Some(home) => SessionStorage::open(home),
        None => SessionStorage::discover()
            .context("No .brandvoice directory found. Run `brandvoice init` first.")?,
    };

    if !storage.is_initialized() {
        anyhow::bail!(
            "Brand voice is not initialized in {}. Run `brandvoice init` first.",
            storage.home().display()
        );
    }
    Ok(storage)
}
