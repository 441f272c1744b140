//! Durable key-value storage for the three persisted records.

mod error;
mod file_store;
mod memory_store;

use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use error::StoreError;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;

pub const GAME_STATE_KEY: &str = "game-state";
pub const STATS_KEY: &str = "stats";
pub const PUZZLE_HISTORY_KEY: &str = "puzzle-history";

/// String storage that survives process restarts.
///
/// Methods take `&self` so a single store can be shared by every tracker.
pub trait PersistenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads and decodes a record. Absent keys, unreadable stores and malformed
/// JSON all come back as `None`.
pub fn load_record<T: DeserializeOwned>(store: &dyn PersistenceStore, key: &str) -> Option<T> {
    let contents = match store.read(key) {
        Ok(Some(contents)) => contents,
        Ok(None) => return None,
        Err(err) => {
            error!(target: "store", "Error loading {}: {}", key, err);
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(target: "store", "Discarding malformed {}: {}", key, err);
            None
        }
    }
}

/// Encodes and writes a record, logging instead of failing.
pub fn save_record<T: Serialize>(store: &dyn PersistenceStore, key: &str, record: &T) -> bool {
    let result = serde_json::to_string(record)
        .map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })
        .and_then(|contents| store.write(key, &contents));
    match result {
        Ok(()) => true,
        Err(err) => {
            error!(target: "store", "Error saving {}: {}", key, err);
            false
        }
    }
}

/// Deletes a record, logging instead of failing.
pub fn clear_record(store: &dyn PersistenceStore, key: &str) -> bool {
    match store.delete(key) {
        Ok(()) => true,
        Err(err) => {
            error!(target: "store", "Error clearing {}: {}", key, err);
            false
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::model::StatsRecord;

    /// Store whose every operation fails, as when storage quota is exhausted.
    pub struct BrokenStore;

    impl PersistenceStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }

        fn delete(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_malformed_record_loads_as_none() {
        let store = MemoryStore::new();
        store.write(STATS_KEY, "{not json").unwrap();
        assert_eq!(load_record::<StatsRecord>(&store, STATS_KEY), None);
    }

    #[test]
    fn test_broken_store_is_swallowed() {
        let store = BrokenStore;
        assert_eq!(load_record::<StatsRecord>(&store, STATS_KEY), None);
        assert!(!save_record(&store, STATS_KEY, &StatsRecord::default()));
        assert!(!clear_record(&store, STATS_KEY));
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let stats = StatsRecord {
            games_played: 2,
            games_won: 1,
            ..Default::default()
        };
        assert!(save_record(&store, STATS_KEY, &stats));
        assert_eq!(load_record::<StatsRecord>(&store, STATS_KEY), Some(stats));
    }
}
