//! Command line checker for files of choice expressions.
//!
//! Reads a JSON policy describing one choose token, an optional list of known
//! objects and any number of expression files, then checks, canonicalises or
//! dumps every expression. Reports go to stdout and logs to stderr.

mod cli;
mod config;
mod error;
mod input;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::config::{CheckConfig, LogLevel};
use crate::error::CheckError;
use crate::logging::init_logging;

fn build_config(cli: &Cli) -> Result<CheckConfig, CheckError> {
    let config = CheckConfig::from_env()?;
    Ok(config.apply_overrides(cli.log_level))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CheckConfig::default().with_log_level(LogLevel::Error));
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);

    match cli::run(&cli.command) {
        Ok(summary) if summary.is_clean() => ExitCode::SUCCESS,
        Ok(summary) => {
            tracing::info!(failed = summary.failed, "some expressions failed");
            ExitCode::from(1)
        }
        Err(e) => {
            tracing::error!(error = ?e, "choice-check failed");
            ExitCode::from(2)
        }
    }
}
