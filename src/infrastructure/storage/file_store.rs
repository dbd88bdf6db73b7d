//! File-backed expiry store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use super::store::{ExpiryStore, StoreResult};

/// Expiry store persisted as a small JSON object on disk.
///
/// Plays the role browser local storage plays for the login page: a handful
/// of string keys surviving across runs. The whole map is rewritten on every
/// mutation; the file stays a few bytes large.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, loading any existing contents.
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first write.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError`] if the file exists but cannot be read
    /// or parsed.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), "opened expiry store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_string(entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl ExpiryStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.remove(key).is_some() {
            return self.persist(&entries);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_store_path(tag: &str) -> PathBuf {
        env::temp_dir().join(format!("login-client-{}-{}.json", tag, std::process::id()))
    }

    #[test]
    fn set_get_remove_roundtrip() {
        let path = temp_store_path("roundtrip");
        let store = FileStore::open(&path).unwrap();

        store.set("tokenExpiration", "1700000000000").unwrap();
        assert_eq!(
            store.get("tokenExpiration").unwrap().as_deref(),
            Some("1700000000000")
        );

        store.remove("tokenExpiration").unwrap();
        assert_eq!(store.get("tokenExpiration").unwrap(), None);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn values_survive_reopen() {
        let path = temp_store_path("reopen");
        {
            let store = FileStore::open(&path).unwrap();
            store.set("tokenExpiration", "42").unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("tokenExpiration").unwrap().as_deref(), Some("42"));

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn missing_file_starts_empty() {
        let path = temp_store_path("missing");
        let _ = fs::remove_file(&path);

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn removing_absent_key_is_ok() {
        let path = temp_store_path("absent");
        let store = FileStore::open(&path).unwrap();

        assert!(store.remove("nothing-here").is_ok());

        let _ = fs::remove_file(path);
    }
}
