//! Preference store implementations.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parking_lot::RwLock;

use super::error::PrefsError;

/// A flat string key-value store for device-local view preferences.
///
/// Implementations must be cheap to call from UI event handlers: `set` is
/// invoked synchronously on every view-state mutation. Failures inside an
/// implementation degrade (log and carry on); they are never surfaced to
/// the mutation path.
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Removes `key`, returning its previous value.
    fn remove(&self, key: &str) -> Option<String>;
}

/// In-memory preference store.
///
/// Holds preferences for the lifetime of the process. Used by tests and by
/// sessions that should not touch the disk.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.data.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) -> Option<String> {
        self.data.write().remove(key)
    }
}

/// File-backed preference store: one JSON object of string keys and string
/// values.
///
/// Every `set`/`remove` rewrites the file atomically (temp file in the same
/// directory, then rename), so a crash mid-write never leaves a torn file
/// behind. A missing or malformed file opens as an empty store — corrupted
/// preferences fall back to defaults, they do not fail the table.
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A file that is missing, unreadable, or not a JSON string map starts
    /// the store empty; the condition is logged at `warn`, never returned.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match Self::read_map(&path) {
            Ok(map) => map,
            Err(PrefsError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                HashMap::new()
            }
            Err(err) => {
                tracing::warn!(
                    target: "rowhouse::prefs",
                    %err,
                    "preference file unusable; starting empty"
                );
                HashMap::new()
            }
        };

        Self {
            path,
            data: RwLock::new(data),
        }
    }

    /// Opens the store at the platform's standard config location.
    pub fn at_default_location() -> Result<Self, PrefsError> {
        let dirs = ProjectDirs::from("com", "Rowhouse Labs", "Rowhouse")
            .ok_or(PrefsError::NoConfigDir)?;
        let dir = dirs.config_dir();
        fs::create_dir_all(dir).map_err(|e| PrefsError::io(dir, e))?;
        Ok(Self::open(dir.join("view_prefs.json")))
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the backing file, replacing in-memory state.
    pub fn reload(&self) -> Result<(), PrefsError> {
        let map = Self::read_map(&self.path)?;
        *self.data.write() = map;
        Ok(())
    }

    /// Writes the current state to the backing file atomically.
    pub fn flush(&self) -> Result<(), PrefsError> {
        let serialized = {
            let data = self.data.read();
            serde_json::to_vec_pretty(&*data)
                .map_err(|e| PrefsError::malformed(&self.path, e))?
        };

        let parent = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent).map_err(|e| PrefsError::io(parent, e))?;

        let tmp = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| PrefsError::io(parent, e))?;
        fs::write(tmp.path(), &serialized).map_err(|e| PrefsError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| PrefsError::io(&self.path, e.error))?;
        Ok(())
    }

    fn read_map(path: &Path) -> Result<HashMap<String, String>, PrefsError> {
        let content = fs::read_to_string(path).map_err(|e| PrefsError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| PrefsError::malformed(path, e))
    }

    fn flush_or_warn(&self) {
        if let Err(err) = self.flush() {
            tracing::warn!(
                target: "rowhouse::prefs",
                %err,
                "failed to persist preferences"
            );
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.data.write().insert(key.to_string(), value.to_string());
        self.flush_or_warn();
    }

    fn remove(&self, key: &str) -> Option<String> {
        let removed = self.data.write().remove(key);
        if removed.is_some() {
            self.flush_or_warn();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("missing"), None);

        store.set("k", "v1");
        store.set("k", "v2");
        assert_eq!(store.get("k"), Some("v2".to_string()));
        assert_eq!(store.len(), 1);

        assert_eq!(store.remove("k"), Some("v2".to_string()));
        assert_eq!(store.remove("k"), None);
    }

    #[test]
    fn test_file_store_round_trip_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view_prefs.json");

        {
            let store = JsonFileStore::open(&path);
            store.set("listings.columns.visible", r#"["code"]"#);
        }

        let reopened = JsonFileStore::open(&path);
        assert_eq!(
            reopened.get("listings.columns.visible"),
            Some(r#"["code"]"#.to_string())
        );
    }

    #[test]
    fn test_file_store_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("never_written.json"));
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_file_store_corrupted_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view_prefs.json");
        fs::write(&path, "{definitely not json").unwrap();

        // Corruption degrades to "absent", never an error.
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("anything"), None);

        // The next write replaces the corrupt file with a valid one.
        store.set("k", "v");
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("k"), Some("v".to_string()));
    }

    #[test]
    fn test_file_store_reload_reports_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view_prefs.json");
        let store = JsonFileStore::open(&path);
        store.set("k", "v");

        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(
            store.reload(),
            Err(PrefsError::Malformed { .. })
        ));

        // In-memory state survives a failed reload.
        assert_eq!(store.get("k"), Some("v".to_string()));
    }

    #[test]
    fn test_file_store_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view_prefs.json");

        let store = JsonFileStore::open(&path);
        store.set("a", "1");
        store.set("b", "2");
        store.remove("a");

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("a"), None);
        assert_eq!(reopened.get("b"), Some("2".to_string()));
    }
}
