//! analysis-gate - quality gate for orchestrator analyses
//!
//! Scores an analysis JSON document against progressively more tolerant
//! thresholds and reports the strictest tier it clears.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins over --log-level; logs go to stderr so stdout stays parseable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let code = cli::run(cli)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
