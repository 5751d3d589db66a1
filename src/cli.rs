//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use xml_merge::defaults::{default_cache_root, CACHE_ROOT_ENV, DEFAULT_LOG_LEVEL};

use crate::commands::{self, Context};

/// XML Merge - Merge directive-annotated XML into a manifest, and undo it
#[derive(Parser, Debug)]
#[command(name = "xml-merge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Directory holding pristine copies of merged files
    #[arg(long, global = true, value_name = "DIR", env = CACHE_ROOT_ENV)]
    cache_root: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge the specified config into the manifest file
    Merge(commands::merge::MergeArgs),

    /// Restore the specified manifest if there is a cached version
    Restore(commands::restore::RestoreArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let context = Context {
            cache_root: self.cache_root.unwrap_or_else(default_cache_root),
            quiet: self.quiet,
        };

        match self.command {
            Commands::Merge(args) => commands::merge::execute(args, &context),
            Commands::Restore(args) => commands::restore::execute(args, &context),
        }
    }
}

/// Send `log` records to stderr. `RUST_LOG` takes precedence over
/// `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
