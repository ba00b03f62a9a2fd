//! # gitr CLI
//!
//! This is the binary entry point for the `gitr` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Printing the diagnostic for a failed run and exiting with the status of
//!   the external command that failed, or 1 for any other error.
//!
//! The recursive logic lives in the `gitr` library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    let output = cli.output_config();

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", output.error_prefix(), err);
            let code = err
                .downcast_ref::<gitr::error::Error>()
                .map(gitr::error::Error::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
