//! # XML Merge CLI
//!
//! This is the binary entry point for the `xml-merge` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Turning errors into a diagnostic on stderr and a process exit code.
//!
//! The core application logic is defined in the `lib.rs` library crate, ensuring
//! that the binary is a thin wrapper around the reusable library functionality.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use xml_merge::error::Error;
use xml_merge::exit_codes;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli.execute() {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(err) => {
            let code = err
                .downcast_ref::<Error>()
                .map(Error::exit_code)
                .unwrap_or(exit_codes::FATAL);
            if code == exit_codes::FATAL {
                // Fatal errors get the full cause chain
                eprintln!("Error: {:?}", err);
            } else {
                eprintln!("{}", err);
            }
            ExitCode::from(code)
        }
    }
}
