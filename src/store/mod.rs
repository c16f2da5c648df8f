//! Device-local persistence
//!
//! Everything the tracker keeps locally lives under a handful of fixed keys
//! in a [`StateStore`]. The store only moves strings around; JSON encoding
//! and corrupt-data recovery happen in [`Persistence`].
//!
//! # Backends
//!
//! - [`MemoryStore`]: process memory, used by tests
//! - [`JsonDirStore`]: one JSON file per key in a data directory
//! - [`SqliteStore`]: a key/value table in `state.db`

mod json_dir;
mod memory;
mod persistence;
mod sqlite;

pub use json_dir::JsonDirStore;
pub use memory::MemoryStore;
pub use persistence::{Persistence, PhotoMap};
pub use sqlite::SqliteStore;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed storage keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    ChallengeData,
    WorkoutPhotos,
    Achievements,
    UserHabits,
    Subscription,
    Trial,
    Reminder,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChallengeData => "66-challenge-data",
            Self::WorkoutPhotos => "66-challenge-photos",
            Self::Achievements => "userAchievements",
            Self::UserHabits => "userHabits",
            Self::Subscription => "66challenge_subscription",
            Self::Trial => "66challenge_trial",
            Self::Reminder => "reminderSettings",
        }
    }

    pub fn all() -> &'static [StoreKey] {
        &[
            Self::ChallengeData,
            Self::WorkoutPhotos,
            Self::Achievements,
            Self::UserHabits,
            Self::Subscription,
            Self::Trial,
            Self::Reminder,
        ]
    }
}

/// Storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Key/value port for local persistence.
///
/// Single writer: implementations do read-modify-write with no
/// compare-and-swap.
pub trait StateStore: Send + Sync {
    fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError>;

    fn write(&self, key: StoreKey, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: StoreKey) -> Result<(), StoreError>;
}

impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Which backend to open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Json,
    Sqlite,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

/// Open the configured backend rooted at `data_dir`
pub fn open_backend(
    backend: StorageBackend,
    data_dir: &Path,
) -> Result<Arc<dyn StateStore>, StoreError> {
    let store: Arc<dyn StateStore> = match backend {
        StorageBackend::Json => Arc::new(JsonDirStore::open(data_dir)?),
        StorageBackend::Sqlite => Arc::new(SqliteStore::open(&data_dir.join("state.db"))?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    tracing::debug!("Opened {} store at {}", backend.as_str(), data_dir.display());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_keys_are_distinct() {
        let mut names: Vec<&str> = StoreKey::all().iter().map(|k| k.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), StoreKey::all().len());
    }

    #[test]
    fn test_open_backend_variants() {
        let dir = tempdir().unwrap();
        for backend in [StorageBackend::Json, StorageBackend::Sqlite, StorageBackend::Memory] {
            let store = open_backend(backend, dir.path()).unwrap();
            store.write(StoreKey::UserHabits, "[\"Run\"]").unwrap();
            assert_eq!(
                store.read(StoreKey::UserHabits).unwrap().as_deref(),
                Some("[\"Run\"]"),
                "backend {}",
                backend.as_str()
            );
        }
    }
}
