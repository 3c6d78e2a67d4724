use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use brandvoice_analyze::InterviewResponses;
use brandvoice_core::model::Method;
use brandvoice_sdk::ParameterRun;
use clap::Args;

use crate::output::format::{format_profile, format_questions};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct InterviewArgs {
    /// Answers as a JSON object keyed by question name
    #[arg(long, conflicts_with = "questions")]
    pub answers: Option<PathBuf>,

    /// Print the questionnaire (the default without --answers)
    #[arg(long)]
    pub questions: bool,
}

pub fn run(args: &InterviewArgs, home: Option<&Path>, format: OutputFormat) -> Result<()> {
    let path = match &args.answers {
        Some(path) if !args.questions => path,
        _ => {
            println!("{}", format_questions(format));
            return Ok(());
        }
    };

    let storage = super::open_storage(home)?;
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let responses = InterviewResponses::from_json(&json)
        .with_context(|| format!("Invalid interview answers in {}", path.display()))?;
    if responses.is_empty() {
        anyhow::bail!("No answers found in {}", path.display());
    }

    let mut run = ParameterRun::begin(Method::BrandInterview);
    run.extend(responses.to_params())
        .source(&format!("{} answers", responses.len()));
    let profile = run
        .commit_to(&storage)
        .context("Failed to commit interview answers")?;

    eprintln!("Committed {} interview answers.", responses.len());
    println!("{}", format_profile(&profile, format));
    Ok(())
}
