//! Merge command implementation
//!
//! The merge command runs the full pipeline:
//! 1. Validating parameters and input files
//! 2. Parsing the manifest and the config
//! 3. Caching a pristine copy of the manifest
//! 4. Applying the config's directives to the manifest
//! 5. Writing the merged manifest back in place

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use xml_merge::cache::{BackupCache, CacheStatus};
use xml_merge::document::{self, load_file, render_target, save_file};
use xml_merge::error::Error;
use xml_merge::merge::{DirectiveMerger, MergeOptions};
use xot::Xot;

use super::Context;

/// Arguments for the merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// The file to update
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// The file to get new values from
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Replace an existing cached copy of the manifest
    #[arg(long, alias = "forceCache")]
    pub force_cache: bool,

    /// Skip elements that have nowhere to go instead of failing
    #[arg(long)]
    pub lenient: bool,
}

/// Execute the merge command
pub fn execute(args: MergeArgs, context: &Context) -> Result<()> {
    let manifest = required(args.manifest, "manifest")?;
    let config = required(args.config, "config")?;
    ensure_exists(&manifest, "Manifest")?;
    ensure_exists(&config, "Config")?;

    let mut xot = Xot::new();

    context.progress("Reading manifest file...");
    let manifest_xml = load_file(&manifest)?;
    let target = document::parse(&mut xot, &manifest_xml, &manifest.display().to_string())?;
    context.progress("\tFinished reading manifest file");

    context.progress("Reading config file...");
    let config_xml = load_file(&config)?;
    let config_doc = document::parse(&mut xot, &config_xml, &config.display().to_string())?;
    context.progress("\tFinished reading config file");

    context.progress("Storing cached version of manifest...");
    let mut cache = BackupCache::new(context.cache_root.clone());
    let handle = cache.save(&manifest, args.force_cache)?;
    if handle.status == CacheStatus::AlreadyCached {
        context.progress("\tA cached version already exists. To force new cache use --force-cache");
    }
    context.progress("\tManifest cached");

    context.progress("Merging config into manifest...");
    let merger = DirectiveMerger::with_options(MergeOptions {
        strict: !args.lenient,
    });
    let report = merger.apply(&mut xot, target, config_doc)?;
    log::info!(
        "Merge finished: {} inserted, {} skipped, {} unsupported",
        report.inserted,
        report.skipped,
        report.unsupported
    );
    context.progress("\tMerged manifest and config");

    context.progress("Writing newly created merged manifest...");
    let merged = render_target(&mut xot, target, &manifest_xml)?;
    save_file(&manifest, &merged)?;
    context.progress("\tFinished writing new manifest");

    context.progress("\nFinished!");
    Ok(())
}

fn required(value: Option<PathBuf>, name: &str) -> std::result::Result<PathBuf, Error> {
    value.ok_or_else(|| Error::MissingParameter {
        name: name.to_string(),
    })
}

fn ensure_exists(path: &Path, role: &str) -> std::result::Result<(), Error> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::FileNotFound {
            role: role.to_string(),
            path: path.to_path_buf(),
        })
    }
}
