use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod output;

#[derive(Parser)]
#[command(
    name = "brandvoice",
    version,
    about = "Merge brand voice signals from documents, interviews and websites into one profile"
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: output::OutputFormat,

    /// Brand voice home directory (default: discover .brandvoice/ upwards)
    #[arg(long, global = true, env = "BRANDVOICE_HOME")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Commands,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let home = cli.home.as_deref();
    match &cli.command {
        commands::Commands::Init(args) => commands::init::run(args, home),
        commands::Commands::Commit(args) => commands::commit::run(args, home, cli.format),
        commands::Commands::Analyze(args) => commands::analyze::run(args, home, cli.format),
        commands::Commands::Interview(args) => commands::interview::run(args, home, cli.format),
        commands::Commands::Show => commands::show::run(home, cli.format),
        commands::Commands::Status => commands::status::run(home, cli.format),
        commands::Commands::Explain => commands::explain::run(home, cli.format),
        commands::Commands::Example => commands::example::run(home, cli.format),
        commands::Commands::Export(args) => commands::export::run(args, home),
        commands::Commands::Adjust(args) => commands::adjust::run(args, home, cli.format),
        commands::Commands::Discard(args) => commands::discard::run(args, home),
        commands::Commands::Reset => commands::reset::run(home),
        commands::Commands::Mcp => commands::mcp::run(home),
        commands::Commands::Version => commands::version::run(),
    }
}
