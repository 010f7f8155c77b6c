//! # descry command-line entry point
//!
//! ```bash
//! descry shape -f pima.csv
//! descry classes -f pima.csv --column diabetes
//! descry correlation -f iris.csv --method spearman --json
//! descry report -f pima.csv --class-column diabetes
//! ```
//!
//! Results go to stdout, logs to stderr and the rolling log file.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // results are printed by the binary

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = cli::effective_config(&cli)?;

    descry::logging::init(&config.log_level)?;
    tracing::debug!(?config, "Effective settings");

    cli::run_command(&cli, config)
}
