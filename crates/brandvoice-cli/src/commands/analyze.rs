use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use brandvoice_analyze::{analyze_text, collect_documents};
use brandvoice_core::model::Method;
use brandvoice_sdk::ParameterRun;
use clap::Args;

use crate::output::format::{format_analysis, format_profile};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Documents or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Input method to commit the result as
    #[arg(long, default_value = "document_upload")]
    pub method: Method,

    /// Print the analysis without committing it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: &AnalyzeArgs, home: Option<&Path>, format: OutputFormat) -> Result<()> {
    let storage = super::open_storage(home)?;
    let config = storage.config().context("Failed to load configuration")?;

    if !config.enabled {
        anyhow::bail!("Brand voice capture is disabled in config.json.");
    }

    let bundle = collect_documents(&args.paths, &config).context("Failed to collect documents")?;
    for path in &bundle.skipped {
        tracing::info!(path = %path.display(), "Skipped document");
    }

    let analysis = analyze_text(&bundle.text);
    let params = analysis.to_params(config.preferred_terms_per_run);

    if args.dry_run {
        println!("{}", format_analysis(&analysis, &params, format));
        return Ok(());
    }

    let mut run = ParameterRun::begin(args.method);
    run.extend(params).source(&bundle.source_label());
    let profile = run
        .commit_to(&storage)
        .context("Failed to commit document analysis")?;

    eprintln!(
        "Analyzed {} document(s), {} skipped; committed {}.",
        bundle.files.len(),
        bundle.skipped.len(),
        args.method
    );
    println!("{}", format_profile(&profile, format));
    Ok(())
}
