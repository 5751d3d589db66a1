//! File stores used by the backup cache
//!
//! The cache only ever needs whole-file reads and writes, so it talks to a
//! small [`FileStore`] trait instead of `std::fs` directly. [`DiskStore`] is
//! the real implementation; [`MemoryFS`] keeps files in a map and backs the
//! unit and property tests.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Whole-file storage operations
pub trait FileStore {
    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Read the full content of a file
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Create or replace a file with the given content
    fn write(&mut self, path: &Path, content: &[u8]) -> Result<()>;

    /// Delete a file
    fn remove(&mut self, path: &Path) -> Result<()>;

    /// Make sure a directory and all of its parents exist
    fn create_dir_all(&mut self, path: &Path) -> Result<()>;

    /// Whether both paths name the same existing file
    fn same_file(&self, a: &Path, b: &Path) -> bool;
}

/// File store backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn write(&mut self, path: &Path, content: &[u8]) -> Result<()> {
        Ok(fs::write(path, content)?)
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        Ok(fs::remove_file(path)?)
    }

    fn create_dir_all(&mut self, path: &Path) -> Result<()> {
        Ok(fs::create_dir_all(path)?)
    }

    fn same_file(&self, a: &Path, b: &Path) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// In-memory file store
#[derive(Debug, Clone, Default)]
pub struct MemoryFS {
    /// Files stored as path -> content mapping
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryFS {
    /// Create a new empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with string content
    pub fn add_file_string<P: AsRef<Path>>(&mut self, path: P, content: &str) {
        self.files
            .insert(path.as_ref().to_path_buf(), content.as_bytes().to_vec());
    }

    /// Get the content of a file by path
    pub fn get_file<P: AsRef<Path>>(&self, path: P) -> Option<&[u8]> {
        self.files.get(path.as_ref()).map(Vec::as_slice)
    }

    /// Get the number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if filesystem is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileStore for MemoryFS {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
            .into()
        })
    }

    fn write(&mut self, path: &Path, content: &[u8]) -> Result<()> {
        self.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        match self.files.remove(path) {
            Some(_) => Ok(()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
            .into()),
        }
    }

    fn create_dir_all(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    // Keys are compared as given; no normalization.
    fn same_file(&self, a: &Path, b: &Path) -> bool {
        a == b && self.files.contains_key(a)
    }
}
