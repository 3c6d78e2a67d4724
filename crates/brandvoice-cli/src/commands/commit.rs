use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use brandvoice_analyze::import_analysis_json;
use brandvoice_core::model::{Method, PartialParameterSet};
use brandvoice_sdk::ParameterRun;
use clap::Args;

use crate::output::format::format_profile;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct CommitArgs {
    /// Input method: document_upload, brand_interview or web_scraper
    pub method: Method,

    /// Partial parameter set as a JSON file
    #[arg(long, conflicts_with = "analysis")]
    pub file: Option<PathBuf>,

    /// External AI analysis document to import
    #[arg(long)]
    pub analysis: Option<PathBuf>,

    /// Set one field, e.g. `--set formality.level=7` or `--set personality.primary_traits='["bold"]'`
    #[arg(long = "set", value_name = "PATH=VALUE")]
    pub sets: Vec<String>,

    /// What this run consumed (file names, URL)
    #[arg(long)]
    pub source: Option<String>,
}

pub fn run(args: &CommitArgs, home: Option<&Path>, format: OutputFormat) -> Result<()> {
    let storage = super::open_storage(home)?;

    let mut run = ParameterRun::begin(args.method);
    if let Some(path) = &args.file {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let set = PartialParameterSet::from_json(&json)
            .with_context(|| format!("Invalid parameter set in {}", path.display()))?;
        run.extend(set);
    }
    if let Some(path) = &args.analysis {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let set = import_analysis_json(&json)
            .with_context(|| format!("Failed to import analysis {}", path.display()))?;
        run.extend(set);
    }
    for assignment in &args.sets {
        let (path, raw) = assignment
            .split_once('=')
            .with_context(|| format!("Expected PATH=VALUE, got '{assignment}'"))?;
        run.set_raw(path.trim(), raw.trim())
            .with_context(|| format!("Failed to set '{path}'"))?;
    }

    let source = args
        .source
        .clone()
        .or_else(|| args.analysis.as_ref().map(|p| p.display().to_string()))
        .or_else(|| args.file.as_ref().map(|p| p.display().to_string()));
    if let Some(source) = &source {
        run.source(source);
    }

    let profile = run
        .commit_to(&storage)
        .context("Failed to commit parameters")?;

    eprintln!("Committed {}.", args.method);
    println!("{}", format_profile(&profile, format));
    Ok(())
}
