//! The [`SaveStore`] trait and its two implementations.
//!
//! A missing save is not an error: it loads as [`SaveRecord::default`].

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ramen_types::SaveRecord;
use tracing::debug;

use crate::error::StoreError;

/// Key/value persistence for the player's progress.
pub trait SaveStore {
    /// Load the stored record, or the default record if none exists.
    fn load(&self) -> Result<SaveRecord, StoreError>;

    /// Replace the stored record.
    fn save(&self, record: &SaveRecord) -> Result<(), StoreError>;

    /// Restore the default record.
    fn reset(&self) -> Result<SaveRecord, StoreError> {
        let record = SaveRecord::default();
        self.save(&record)?;
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// JSON file
// ---------------------------------------------------------------------------

/// Stores the record as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for JsonFileStore {
    fn load(&self) -> Result<SaveRecord, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let record = serde_json::from_str(&contents)?;
                debug!(path = %self.path.display(), "Save record loaded");
                Ok(record)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No save file, using defaults");
                Ok(SaveRecord::default())
            }
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn save(&self, record: &SaveRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        // Replace the target atomically.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), currency = record.currency, "Save record written");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Keeps the record in memory. Used by tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<SaveRecord>>,
}

impl MemoryStore {
    /// An empty store; loads return the default record.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with `record`.
    pub fn with_record(record: SaveRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

impl SaveStore for MemoryStore {
    fn load(&self) -> Result<SaveRecord, StoreError> {
        let guard = self.record.lock().map_err(|_poisoned| StoreError::Poisoned)?;
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, record: &SaveRecord) -> Result<(), StoreError> {
        let mut guard = self.record.lock().map_err(|_poisoned| StoreError::Poisoned)?;
        *guard = Some(record.clone());
        Ok(())
    }
}

impl<S: SaveStore + ?Sized> SaveStore for std::sync::Arc<S> {
    fn load(&self) -> Result<SaveRecord, StoreError> {
        (**self).load()
    }

    fn save(&self, record: &SaveRecord) -> Result<(), StoreError> {
        (**self).save(record)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use ramen_types::MenuId;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("ramen-store-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    fn sample() -> SaveRecord {
        SaveRecord {
            currency: 12_500,
            high_score: 9000,
            total_served: 42,
            unlocked_menus: vec![MenuId::from("basic"), MenuId::from("egg"), MenuId::from("kimchi")],
            best_streak: 7,
            last_saved_at: Some(Utc::now()),
        }
    }

    #[test]
    fn missing_file_loads_default() {
        let store = JsonFileStore::new(temp_path("save.json"));
        assert_eq!(store.load().unwrap(), SaveRecord::default());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let path = temp_path("save.json");
        let record = sample();
        JsonFileStore::new(&path).save(&record).unwrap();
        let loaded = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(loaded, record);
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = temp_path("save.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        let result = JsonFileStore::new(&path).load();
        assert!(matches!(result, Err(StoreError::Serialization(_))));
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn reset_restores_default() {
        let store = MemoryStore::with_record(sample());
        assert_eq!(store.load().unwrap().currency, 12_500);
        let record = store.reset().unwrap();
        assert_eq!(record, SaveRecord::default());
        assert_eq!(store.load().unwrap(), SaveRecord::default());
    }

    #[test]
    fn shared_store_sees_saves() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let handle = std::sync::Arc::clone(&store);
        handle.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap().total_served, 42);
    }
}
