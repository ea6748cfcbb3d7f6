use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use depview::{DepviewConfig, RunArgs, run_main};
use depview_error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "depview",
    about = "depview: project references of a solution, as reports and graphs",
    version
)]
pub struct Cli {
    #[command(flatten)]
    run: RunArgs,

    /// Config file (defaults to ./depview.toml when present)
    #[arg(short = 'c', long = "config", value_name = "TOML")]
    config: Option<PathBuf>,
}

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let config = DepviewConfig::discover(args.config.as_deref())?;
    let opts = args.run.into_options(config)?;

    if let Some(output) = run_main(&opts)? {
        print!("{output}");
    }

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(())
}

pub fn main() -> ExitCode {
    let args = Cli::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            tracing::error!(error = %e, "execution failed");
            ExitCode::FAILURE
        }
    }
}
