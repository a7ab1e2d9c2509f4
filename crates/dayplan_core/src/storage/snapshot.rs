//! Whole-state snapshot persistence.
//!
//! # Responsibility
//! - Serialize `AppState` to JSON under a single key and read it back.
//! - Apply the degrade-don't-fail policy at the storage boundary.
//!
//! # Invariants
//! - `load` never fails: missing data yields defaults, unreadable data is
//!   logged and yields defaults.
//! - `save` never fails: errors are logged and reported as `false`.
//! - Log events carry counts and error text only, never user content.

use crate::model::state::AppState;
use crate::storage::{KeyValueStore, StorageError, StorageResult};
use log::{error, info, warn};
use std::time::Instant;

/// Storage key of the planner snapshot.
pub const DEFAULT_SNAPSHOT_KEY: &str = "daily-planner-v1";

pub struct SnapshotStorage<K: KeyValueStore> {
    backend: K,
    key: String,
}

impl<K: KeyValueStore> SnapshotStorage<K> {
    pub fn new(backend: K) -> Self {
        Self::with_key(backend, DEFAULT_SNAPSHOT_KEY)
    }

    pub fn with_key(backend: K, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    /// Reads the stored snapshot.
    ///
    /// Returns `Ok(None)` when nothing (or only whitespace) was stored.
    /// Loaded tasks have their completion timestamp repaired.
    ///
    /// # Errors
    /// - Backend failures.
    /// - `StorageError::Deserialize` for corrupt or invalid snapshots.
    pub fn try_load(&self) -> StorageResult<Option<AppState>> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let mut state: AppState = serde_json::from_str(&raw).map_err(StorageError::Deserialize)?;
        state.normalize();
        Ok(Some(state))
    }

    /// Writes the whole snapshot, replacing the previous one.
    pub fn try_save(&self, state: &AppState) -> StorageResult<()> {
        let raw = serde_json::to_string(state).map_err(StorageError::Serialize)?;
        self.backend.put(&self.key, &raw)
    }

    /// Loads the snapshot, falling back to the empty state.
    pub fn load(&self) -> AppState {
        let started_at = Instant::now();
        match self.try_load() {
            Ok(Some(state)) => {
                info!(
                    "event=snapshot_load module=storage status=ok tasks={} habits={} energy_logs={} duration_ms={}",
                    state.tasks.len(),
                    state.habits.len(),
                    state.energy_logs.len(),
                    started_at.elapsed().as_millis()
                );
                state
            }
            Ok(None) => {
                info!("event=snapshot_load module=storage status=empty");
                AppState::default()
            }
            Err(err) => {
                warn!(
                    "event=snapshot_load module=storage status=fallback error_code=snapshot_unreadable error={err}"
                );
                AppState::default()
            }
        }
    }

    /// Saves the snapshot; returns whether it reached the backend.
    pub fn save(&self, state: &AppState) -> bool {
        let started_at = Instant::now();
        match self.try_save(state) {
            Ok(()) => {
                info!(
                    "event=snapshot_save module=storage status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                true
            }
            Err(err) => {
                error!(
                    "event=snapshot_save module=storage status=error error_code=snapshot_write_failed error={err}"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SnapshotStorage, DEFAULT_SNAPSHOT_KEY};
    use crate::storage::{KeyValueStore, MemoryKeyValueStore, StorageError};

    #[test]
    fn missing_and_blank_values_load_as_defaults() {
        let backend = MemoryKeyValueStore::new();
        let storage = SnapshotStorage::new(&backend);
        assert_eq!(storage.try_load().unwrap(), None);

        backend.put(DEFAULT_SNAPSHOT_KEY, "   ").unwrap();
        assert_eq!(storage.try_load().unwrap(), None);
        assert!(storage.load().is_empty());
    }

    #[test]
    fn corrupt_value_reports_deserialize_but_load_falls_back() {
        let backend = MemoryKeyValueStore::new();
        backend.put(DEFAULT_SNAPSHOT_KEY, "{not json").unwrap();
        let storage = SnapshotStorage::new(&backend);

        assert!(matches!(
            storage.try_load(),
            Err(StorageError::Deserialize(_))
        ));
        assert!(storage.load().is_empty());
    }

    #[test]
    fn custom_key_isolates_snapshots() {
        let backend = MemoryKeyValueStore::new();
        let storage = SnapshotStorage::with_key(&backend, "planner-test");
        assert!(storage.save(&Default::default()));
        assert_eq!(storage.key(), "planner-test");
        assert_eq!(backend.get(DEFAULT_SNAPSHOT_KEY).unwrap(), None);
        assert!(backend.get("planner-test").unwrap().is_some());
    }
}
