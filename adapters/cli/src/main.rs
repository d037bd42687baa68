#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for the huecheck color-vision tools.

mod cli;
mod commands;
mod driver;
mod logging;
mod preferences;
mod settings;
mod transcript;

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use clap::Parser;

use crate::{
    cli::Cli,
    logging::{init_logging, LogConfig},
};

/// Entry point for the huecheck command-line interface.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format)
        .with_ansi(io::stderr().is_terminal());
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialise logging: {error:#}");
        return ExitCode::FAILURE;
    }

    match commands::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
