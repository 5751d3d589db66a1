//! Backup cache for target documents
//!
//! Before a merge rewrites a target file, a byte-for-byte copy of it is saved
//! under the cache root. `restore` copies it back and deletes the entry.
//!
//! Entries are keyed by the target's base file name only: `a/Manifest.xml` and
//! `b/Manifest.xml` share one entry. At most one entry exists per name, and
//! the first snapshot wins unless the caller asks to overwrite it.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::defaults::default_cache_root;
use crate::error::{Error, Result};
use crate::filesystem::{DiskStore, FileStore};

/// What `save` did with the cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No entry existed; one was written
    Created,
    /// An entry existed and was replaced
    Overwritten,
    /// An entry existed and was left untouched
    AlreadyCached,
}

/// Result of a successful `save`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheHandle {
    /// Location of the cache entry
    pub entry: PathBuf,
    pub status: CacheStatus,
}

/// Backup cache rooted at a directory of a [`FileStore`]
#[derive(Debug, Clone)]
pub struct BackupCache<S: FileStore = DiskStore> {
    root: PathBuf,
    store: S,
}

impl BackupCache<DiskStore> {
    /// Create a disk-backed cache rooted at `root`
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self::with_store(root, DiskStore)
    }
}

impl Default for BackupCache<DiskStore> {
    fn default() -> Self {
        Self::new(default_cache_root())
    }
}

impl<S: FileStore> BackupCache<S> {
    /// Create a cache rooted at `root` inside the given store
    pub fn with_store<P: Into<PathBuf>>(root: P, store: S) -> Self {
        Self {
            root: root.into(),
            store,
        }
    }

    /// The cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The underlying file store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying file store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Location of the entry for `path`, or `None` if it has no file name
    pub fn entry_path(&self, path: &Path) -> Option<PathBuf> {
        path.file_name().map(|name| self.root.join(name))
    }

    /// Check if an entry exists for `path`
    pub fn contains(&self, path: &Path) -> bool {
        self.entry_path(path)
            .is_some_and(|entry| self.store.exists(&entry) && !self.store.same_file(path, &entry))
    }

    /// Save a pristine copy of `path`.
    ///
    /// An existing entry is kept unless `overwrite` is set; that case is
    /// reported as [`CacheStatus::AlreadyCached`] and is not an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::CacheWrite` if no entry exists once the attempt is
    /// over, whatever the underlying cause, or if `path` is the cache entry
    /// itself.
    pub fn save(&mut self, path: &Path, overwrite: bool) -> Result<CacheHandle> {
        let entry = self.entry_path(path).ok_or_else(|| Error::CacheWrite {
            path: path.to_path_buf(),
            message: "path has no file name".to_string(),
        })?;
        if self.store.same_file(path, &entry) {
            return Err(Error::CacheWrite {
                path: path.to_path_buf(),
                message: format!("{} is inside the cache", path.display()),
            });
        }

        let existed = self.store.exists(&entry);
        if existed && !overwrite {
            warn!(
                "A cached version of {} already exists. To force a new cache use --force-cache",
                path.display()
            );
            return Ok(CacheHandle {
                entry,
                status: CacheStatus::AlreadyCached,
            });
        }

        match self.copy_into_cache(path, &entry) {
            Ok(()) => {
                debug!("Cached {} at {}", path.display(), entry.display());
                let status = if existed {
                    CacheStatus::Overwritten
                } else {
                    CacheStatus::Created
                };
                Ok(CacheHandle { entry, status })
            }
            Err(err) if self.store.exists(&entry) => {
                warn!(
                    "Could not refresh cached copy of {} ({}); keeping the existing one",
                    path.display(),
                    err
                );
                Ok(CacheHandle {
                    entry,
                    status: CacheStatus::AlreadyCached,
                })
            }
            Err(err) => Err(Error::CacheWrite {
                path: path.to_path_buf(),
                message: err.to_string(),
            }),
        }
    }

    /// Copy the cached entry back over `path` and delete the entry.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoCacheEntry` if nothing is cached for `path`, or if
    /// `path` is the cache entry itself; the file at `path` is not touched in
    /// either case.
    pub fn restore(&mut self, path: &Path) -> Result<()> {
        let entry = match self.entry_path(path) {
            Some(entry) if self.store.exists(&entry) && !self.store.same_file(path, &entry) => {
                entry
            }
            _ => {
                return Err(Error::NoCacheEntry {
                    path: path.to_path_buf(),
                })
            }
        };

        let content = self.store.read(&entry)?;
        self.store.write(path, &content)?;
        debug!("Restored {} from {}", path.display(), entry.display());

        self.store.remove(&entry)?;
        debug!("Removed cache entry {}", entry.display());
        Ok(())
    }

    fn copy_into_cache(&mut self, path: &Path, entry: &Path) -> Result<()> {
        let content = self.store.read(path)?;
        self.store.create_dir_all(&self.root)?;
        self.store.write(entry, &content)
    }
}
