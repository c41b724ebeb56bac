//! Device-local preference storage.
//!
//! The engine persists view preferences through the [`PreferenceStore`]
//! trait: a flat string key-value store constructed once per application
//! and passed by reference to every table. Sharing is intentional — all
//! listing tables read and write one preference set — but it is explicit:
//! there is no hidden global, only the store instance the application
//! chooses to share.
//!
//! Two implementations ship with the crate: [`MemoryStore`] for tests and
//! ephemeral sessions, and [`JsonFileStore`] for the real thing — one JSON
//! object per file, written atomically, with unreadable files degrading to
//! an empty store rather than an error.

mod error;
mod store;

pub use error::PrefsError;
pub use store::{JsonFileStore, MemoryStore, PreferenceStore};
