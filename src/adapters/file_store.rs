//! JSON-file session store for the CLI.
//!
//! The whole store is one JSON object of string values. Every write rewrites
//! the file through a temporary sibling and a rename, so a crash mid-write
//! leaves the previous state intact.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::StateStore;

/// A [`StateStore`] persisted to a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStateStore {
    path: PathBuf,
}

impl JsonFileStateStore {
    /// Store backed by the file at `path`; the file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the backing file, readable or not.
    pub fn clear(&mut self) -> DomainResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "state file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn load(&self) -> DomainResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                DomainError::StorageError(format!(
                    "corrupt state file {}: {e}",
                    self.path.display()
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> DomainResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), keys = entries.len(), "state file written");
        Ok(())
    }

    /// Loads the file for a write, starting over if it is corrupt.
    ///
    /// The flag is true when the file was unreadable and must be rewritten
    /// even if the caller changes nothing.
    fn load_for_write(&self) -> (BTreeMap<String, String>, bool) {
        match self.load() {
            Ok(entries) => (entries, false),
            Err(e) => {
                tracing::warn!(error = %e, "overwriting unreadable state file");
                (BTreeMap::new(), true)
            }
        }
    }
}

impl StateStore for JsonFileStateStore {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        let (mut entries, _) = self.load_for_write();
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> DomainResult<()> {
        let (mut entries, corrupt) = self.load_for_write();
        if entries.remove(key).is_some() || corrupt {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonFileStateStore {
        JsonFileStateStore::new(dir.path().join("nested").join("session.json"))
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("itinerary").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set("carousel_index", "2").unwrap();
        store.set("history", "{}").unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get("carousel_index").unwrap().as_deref(), Some("2"));
        assert_eq!(reopened.get("history").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set("a", "1").unwrap();
        store.remove("a").unwrap();
        store.remove("never-set").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_errors_on_read_and_recovers_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.get("a"), Err(DomainError::StorageError(_))));

        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_remove_rewrites_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        store.remove("missing").unwrap();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_clear_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.clear().unwrap();

        store.set("a", "1").unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
        assert_eq!(store.get("a").unwrap(), None);
    }
}
