//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `xml-merge` command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the shared
//!   [`Context`] and performs the command's logic.
//!
//! Commands return errors instead of exiting; `main` maps them to exit codes.

use std::path::PathBuf;

pub mod merge;
pub mod restore;

/// Settings shared by every command, taken from the global CLI flags
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory holding cache entries
    pub cache_root: PathBuf,
    /// Suppress progress output
    pub quiet: bool,
}

impl Context {
    /// Print a progress line unless `--quiet` was given
    pub fn progress(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }
}
