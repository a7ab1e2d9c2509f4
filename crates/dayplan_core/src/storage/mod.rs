//! Persistence port for planner snapshots.
//!
//! # Responsibility
//! - Define the key-value contract the planner persists through.
//! - Provide SQLite, JSON-file and in-memory backends.
//! - Implement the snapshot load/save policy in `SnapshotStorage`.
//!
//! # Invariants
//! - Backends store opaque strings; only `SnapshotStorage` knows the JSON
//!   snapshot shape.
//! - Storage failures stop at `SnapshotStorage::load/save`; the planner
//!   never sees them.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod file;
pub mod memory;
pub mod snapshot;
pub mod sqlite;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use snapshot::{SnapshotStorage, DEFAULT_SNAPSHOT_KEY};
pub use sqlite::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Io(std::io::Error),
    Serialize(serde_json::Error),
    Deserialize(serde_json::Error),
    /// Key cannot be mapped onto the backend (e.g. unsafe file name).
    InvalidKey(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "storage io error: {err}"),
            Self::Serialize(err) => write!(f, "snapshot serialization failed: {err}"),
            Self::Deserialize(err) => write!(f, "stored snapshot is unreadable: {err}"),
            Self::InvalidKey(key) => write!(f, "invalid storage key `{key}`"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Serialize(err) | Self::Deserialize(err) => Some(err),
            Self::InvalidKey(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// String key-value store backing planner snapshots.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for &K {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).put(key, value)
    }
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).put(key, value)
    }
}
