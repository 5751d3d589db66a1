//! Property-based tests for the backup cache.
//!
//! These tests use proptest to generate file contents and paths and verify
//! that the save/restore protocol holds for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::cache::{BackupCache, CacheStatus};
    use crate::error::Error;
    use crate::filesystem::{FileStore, MemoryFS};
    use proptest::prelude::*;
    use std::path::{Path, PathBuf};

    fn cache_with(path: &Path, content: &[u8]) -> BackupCache<MemoryFS> {
        let mut store = MemoryFS::new();
        store.write(path, content).unwrap();
        BackupCache::with_store("cache", store)
    }

    proptest! {
        /// Property: restore after save brings back the exact original bytes,
        /// whatever happened to the file in between
        #[test]
        fn restore_returns_original_bytes(
            original in proptest::collection::vec(any::<u8>(), 0..512),
            mutated in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let path = Path::new("app/AndroidManifest.xml");
            let mut cache = cache_with(path, &original);

            cache.save(path, false).unwrap();
            cache.store_mut().write(path, &mutated).unwrap();
            cache.restore(path).unwrap();

            prop_assert_eq!(cache.store().read(path).unwrap(), original);
            prop_assert!(!cache.contains(path));
        }

        /// Property: without overwrite, the first snapshot is never replaced
        #[test]
        fn first_write_wins(
            first in proptest::collection::vec(any::<u8>(), 0..256),
            second in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let path = Path::new("Manifest.xml");
            let mut cache = cache_with(path, &first);

            cache.save(path, false).unwrap();
            cache.store_mut().write(path, &second).unwrap();
            let handle = cache.save(path, false).unwrap();

            prop_assert_eq!(handle.status, CacheStatus::AlreadyCached);
            prop_assert_eq!(cache.store().read(&handle.entry).unwrap(), first);
        }

        /// Property: the entry location depends only on the base file name
        #[test]
        fn entry_keyed_by_base_name(
            dir_a in "[a-z]{1,8}",
            dir_b in "[a-z]{1,8}",
            name in "[A-Za-z]{1,12}\\.xml",
        ) {
            let cache = BackupCache::with_store("cache", MemoryFS::new());
            let a = cache.entry_path(&PathBuf::from(&dir_a).join(&name));
            let b = cache.entry_path(&PathBuf::from(&dir_b).join(&name));

            prop_assert_eq!(a.clone(), b);
            prop_assert_eq!(a, Some(PathBuf::from("cache").join(&name)));
        }

        /// Property: restoring with nothing cached fails and leaves the file alone
        #[test]
        fn restore_without_entry_is_noop(
            content in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let path = Path::new("Manifest.xml");
            let mut cache = cache_with(path, &content);

            let result = cache.restore(path);

            let no_entry = matches!(result, Err(Error::NoCacheEntry { .. }));
            prop_assert!(no_entry);
            prop_assert_eq!(cache.store().read(path).unwrap(), content);
        }
    }
}
