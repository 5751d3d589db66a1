//! Default values for xml-merge configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Environment variable that overrides the cache root.
pub const CACHE_ROOT_ENV: &str = "XML_MERGE_CACHE";

/// Default log filter when neither `--log-level` nor `RUST_LOG` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Returns the default cache root directory.
///
/// The cache lives in a `cache/` directory relative to the process working
/// directory, so running the tool from a project root keeps backups next to
/// the project. This can be overridden by the `--cache-root` CLI flag or the
/// `XML_MERGE_CACHE` environment variable.
pub fn default_cache_root() -> PathBuf {
    PathBuf::from("cache")
}
