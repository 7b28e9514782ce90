//! File-backed durable key-value storage.

use crate::paths::TalentDeskPaths;
use crate::storage::AtomicJsonFile;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use talentdesk_core::Result;
use talentdesk_core::storage::KeyValueStore;

type Entries = BTreeMap<String, String>;

/// `KeyValueStore` persisted as one JSON object in `storage.json`.
///
/// Reads are served from an in-process cache filled on first access. Each
/// write re-reads the file under an exclusive lock, applies the change and
/// replaces the file atomically, so concurrent processes lose no keys but
/// the last write to a key wins.
pub struct FileKeyValueStore {
    file: AtomicJsonFile<Entries>,
    cache: RwLock<Option<Entries>>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            cache: RwLock::new(None),
        }
    }

    /// Opens the default storage file, or `storage.json` inside `storage_dir`.
    pub fn open(storage_dir: Option<&Path>) -> Result<Self> {
        let path = TalentDeskPaths::storage_file(storage_dir)?;
        tracing::debug!(path = %path.display(), "Opening client storage");
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn entries(&self) -> Result<Entries> {
        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(entries) = cache.as_ref() {
                return Ok(entries.clone());
            }
        }

        let loaded = match self.file.load() {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path().display(),
                    error = %e,
                    "Client storage is unreadable, treating as empty"
                );
                Entries::new()
            }
        };

        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        *cache = Some(loaded.clone());
        Ok(loaded)
    }

    fn write<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Entries),
    {
        let saved = self.file.update(Entries::new(), f)?;
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        *cache = Some(saved);
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.entries()?.get(key).is_none() && !self.file.path().exists() {
            return Ok(());
        }
        self.write(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talentdesk_core::storage::keys;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        let store = FileKeyValueStore::new(path.clone());
        store.set(keys::TOKEN, "abc").unwrap();
        store.set(keys::ROLE, "employee").unwrap();

        let reopened = FileKeyValueStore::new(path);
        assert_eq!(reopened.get(keys::TOKEN).unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.get(keys::ROLE).unwrap().as_deref(), Some("employee"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::open(Some(temp_dir.path())).unwrap();

        store.remove(keys::TOKEN).unwrap();
        assert!(!store.path().exists());

        store.set(keys::TOKEN, "abc").unwrap();
        store.remove(keys::TOKEN).unwrap();
        store.remove(keys::TOKEN).unwrap();
        assert_eq!(store.get(keys::TOKEN).unwrap(), None);
    }

    #[test]
    fn test_writes_from_two_handles_keep_both_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        let first = FileKeyValueStore::new(path.clone());
        let second = FileKeyValueStore::new(path.clone());
        first.set(keys::TOKEN, "abc").unwrap();
        second.set(keys::DAILY_WELLNESS_TIPS, "{}").unwrap();

        let reader = FileKeyValueStore::new(path);
        assert_eq!(reader.get(keys::TOKEN).unwrap().as_deref(), Some("abc"));
        assert_eq!(reader.get(keys::DAILY_WELLNESS_TIPS).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = FileKeyValueStore::new(path);
        assert_eq!(store.get(keys::TOKEN).unwrap(), None);
        store.set(keys::TOKEN, "abc").unwrap();
        assert_eq!(store.get(keys::TOKEN).unwrap().as_deref(), Some("abc"));
    }
}
