//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_manifest(documents::MANIFEST);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::documents;
    pub use super::TestFixture;
}

/// XML documents used across tests.
#[allow(dead_code)]
pub mod documents {
    /// Target manifest with one activity and no services.
    pub const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android" package="com.example.app">
  <uses-permission android:name="android.permission.INTERNET"/>
  <application android:label="Example">
    <activity android:name=".MainActivity"/>
  </application>
</manifest>
"#;

    /// Adds a sync service unless an equivalent one is already declared.
    pub const ADD_SYNC_SERVICE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android"
          xmlns:xm="http://schemas.omax.com/xml-merge">
  <application>
    <service android:name=".SyncService" xm:add="IfNotExist" xm:condition="!sync">
      <intent-filter xm:newCondition="sync">
        <action android:name="com.example.SYNC"/>
      </intent-filter>
    </service>
  </application>
</manifest>
"#;

    /// A config whose directive names a marker that does not exist.
    pub const MISSING_MARKER: &str = r#"<manifest xmlns:xm="http://schemas.omax.com/xml-merge">
  <application>
    <service xm:add="IfNotExist" xm:condition="nowhere">
      <intent-filter/>
    </service>
  </application>
</manifest>
"#;

    /// Not well-formed XML.
    pub const MALFORMED: &str = "<manifest><application></manifest>";
}

/// A test fixture that provides a temporary directory with a manifest and a
/// merge config.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add `AndroidManifest.xml` with the given content.
    pub fn with_manifest(self, content: &str) -> Self {
        self.with_file("AndroidManifest.xml", content)
    }

    /// Add `merge.xml` with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file("merge.xml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.path().join("AndroidManifest.xml")
    }

    /// Path of the merge config file.
    pub fn config_path(&self) -> PathBuf {
        self.path().join("merge.xml")
    }

    /// Path of the manifest's cache entry under the default cache root.
    pub fn cache_entry_path(&self) -> PathBuf {
        self.path().join("cache").join("AndroidManifest.xml")
    }

    /// Current content of the manifest.
    pub fn manifest(&self) -> String {
        std::fs::read_to_string(self.manifest_path()).expect("Failed to read manifest")
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("xml-merge");
        cmd.current_dir(self.path()).env_remove("XML_MERGE_CACHE");
        cmd
    }

    /// A `merge` command for the fixture's manifest and config.
    pub fn merge_command(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("merge")
            .arg("--manifest")
            .arg(self.manifest_path())
            .arg("--config")
            .arg(self.config_path());
        cmd
    }

    /// A `restore` command for the fixture's manifest.
    pub fn restore_command(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("restore").arg("--manifest").arg(self.manifest_path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
