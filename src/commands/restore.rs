//! Restore command implementation
//!
//! Copies the cached version of a manifest back over it and deletes the
//! cache entry.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use xml_merge::cache::BackupCache;
use xml_merge::error::Error;

use super::Context;

/// Arguments for the restore command
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// The file to restore
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,
}

/// Execute the restore command
pub fn execute(args: RestoreArgs, context: &Context) -> Result<()> {
    let manifest = args.manifest.ok_or_else(|| Error::MissingParameter {
        name: "manifest".to_string(),
    })?;

    let mut cache = BackupCache::new(context.cache_root.clone());
    let name = manifest
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    context.progress(&format!("Looking for cached version of {}...", name));
    if !cache.contains(&manifest) {
        return Err(Error::NoCacheEntry { path: manifest }.into());
    }
    context.progress("\tFound cached file");

    context.progress("Restoring cached file...");
    cache.restore(&manifest)?;
    context.progress("\tRestored cached file and removed cache entry");

    context.progress("\nFinished!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn context(temp_dir: &TempDir) -> Context {
        Context {
            cache_root: temp_dir.path().join("cache"),
            quiet: true,
        }
    }

    #[test]
    fn test_execute_missing_manifest_param() {
        let temp_dir = TempDir::new().unwrap();
        let result = execute(RestoreArgs { manifest: None }, &context(&temp_dir));

        let err = result.unwrap_err().downcast::<Error>().unwrap();
        assert!(matches!(err, Error::MissingParameter { .. }));
    }

    #[test]
    fn test_execute_without_cache_entry() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = temp_dir.path().join("AndroidManifest.xml");
        fs::write(&manifest, "<manifest/>").unwrap();

        let result = execute(
            RestoreArgs {
                manifest: Some(manifest.clone()),
            },
            &context(&temp_dir),
        );

        let err = result.unwrap_err().downcast::<Error>().unwrap();
        assert!(matches!(err, Error::NoCacheEntry { .. }));
        assert_eq!(fs::read_to_string(&manifest).unwrap(), "<manifest/>");
    }

    #[test]
    fn test_execute_restores_and_removes_entry() {
        let temp_dir = TempDir::new().unwrap();
        let context = context(&temp_dir);
        let manifest = temp_dir.path().join("AndroidManifest.xml");
        let entry = context.cache_root.join("AndroidManifest.xml");
        fs::create_dir_all(&context.cache_root).unwrap();
        fs::write(&entry, "<manifest>original</manifest>").unwrap();
        fs::write(&manifest, "<manifest>merged</manifest>").unwrap();

        execute(
            RestoreArgs {
                manifest: Some(manifest.clone()),
            },
            &context,
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&manifest).unwrap(),
            "<manifest>original</manifest>"
        );
        assert!(!entry.exists());
    }

    #[test]
    fn test_execute_recreates_deleted_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let context = context(&temp_dir);
        let manifest = temp_dir.path().join("AndroidManifest.xml");
        fs::create_dir_all(&context.cache_root).unwrap();
        fs::write(context.cache_root.join("AndroidManifest.xml"), "<m/>").unwrap();

        execute(
            RestoreArgs {
                manifest: Some(manifest.clone()),
            },
            &context,
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&manifest).unwrap(), "<m/>");
    }
}
