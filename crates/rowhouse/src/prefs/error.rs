//! Error types for preference storage.

use std::path::PathBuf;

/// Errors surfaced by explicit preference-store operations.
///
/// Only [`flush`](crate::prefs::JsonFileStore::flush) and
/// [`reload`](crate::prefs::JsonFileStore::reload) return these; the
/// `get`/`set` fast path degrades and logs instead, because losing a view
/// preference must never take the table down.
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    /// Reading or writing the preference file failed.
    #[error("failed to access preference file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preference file exists but does not hold a JSON string map.
    #[error("preference file '{}' is not a valid JSON string map: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No standard config directory is available on this system.
    #[error("no standard config directory is available on this system")]
    NoConfigDir,
}

impl PrefsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Malformed {
            path: path.into(),
            source,
        }
    }
}
