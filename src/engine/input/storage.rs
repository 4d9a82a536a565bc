// Persistent storage for key maps

use super::keymap::KeyMap;
use log::{debug, error, warn};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Abstract string key-value store
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON document on disk
///
/// The whole document is rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`
    ///
    /// A missing file starts an empty store. A file that is not a JSON object
    /// of strings is logged and replaced on the next write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Ignoring unreadable store {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!("Opened store {} ({} entries)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    /// Default location in the platform data directory
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "snex", "input-mapper")
            .map(|dirs| dirs.data_dir().join("storage.json"))
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Loads and saves key maps through a key-value store
#[derive(Debug)]
pub struct MappingStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> MappingStore<S> {
    /// Wrap a key-value store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the key map stored under `storage_key`
    ///
    /// Falls back to the default map when nothing is stored or the stored
    /// value does not parse.
    pub fn load(&self, storage_key: &str) -> KeyMap {
        let Some(stored) = self.store.get(storage_key) else {
            debug!("No stored key map under '{}', using defaults", storage_key);
            return KeyMap::default();
        };

        match KeyMap::from_json(&stored) {
            Ok(map) => map,
            Err(e) => {
                error!("Key map restore failed for '{}': {}", storage_key, e);
                KeyMap::default()
            }
        }
    }

    /// Save `map` under `storage_key`, logging any failure
    pub fn save(&mut self, storage_key: &str, map: &KeyMap) {
        if let Err(e) = self.try_save(storage_key, map) {
            warn!("Failed to save key map under '{}': {}", storage_key, e);
        }
    }

    /// Save `map` under `storage_key`
    pub fn try_save(&mut self, storage_key: &str, map: &KeyMap) -> Result<(), StorageError> {
        let json = map.to_json()?;
        self.store.set(storage_key, &json)
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::button::Button;

    const KEY: &str = "test-key-map";

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }
    }

    #[test]
    fn test_load_missing_returns_default() {
        let store = MappingStore::new(MemoryStore::new());
        assert_eq!(store.load(KEY), KeyMap::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut store = MappingStore::new(MemoryStore::new());
        let map = KeyMap::from_bindings([(32, Button::Up), (37, Button::Left), (65, Button::Left)]);

        store.save(KEY, &map);
        assert_eq!(store.load(KEY), map);
    }

    #[test]
    fn test_round_trip_of_empty_map() {
        let mut store = MappingStore::new(MemoryStore::new());
        store.save(KEY, &KeyMap::new());
        assert!(store.load(KEY).is_empty());
    }

    #[test]
    fn test_corrupt_value_returns_default() {
        let mut memory = MemoryStore::new();
        memory.set(KEY, "{not json").unwrap();
        let store = MappingStore::new(memory);

        assert_eq!(store.load(KEY), KeyMap::default());
    }

    #[test]
    fn test_wrong_shape_returns_default() {
        for stored in [r#"[1, 2, 3]"#, r#"{"65": 3}"#, r#"{"65": "JUMP"}"#, "null"] {
            let mut memory = MemoryStore::new();
            memory.set(KEY, stored).unwrap();
            let store = MappingStore::new(memory);

            assert_eq!(store.load(KEY), KeyMap::default(), "stored: {}", stored);
        }
    }

    #[test]
    fn test_keys_are_independent() {
        let mut store = MappingStore::new(MemoryStore::new());
        store.save("a", &KeyMap::new());

        assert!(store.load("a").is_empty());
        assert_eq!(store.load("b"), KeyMap::default());
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let mut store = MappingStore::new(ReadOnlyStore);
        store.save(KEY, &KeyMap::default());
        assert!(store.try_save(KEY, &KeyMap::default()).is_err());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("storage.json")).unwrap();
        assert!(store.get(KEY).is_none());
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = MappingStore::new(FileStore::open(&path).unwrap());
        let mut map = KeyMap::default();
        map.bind(32, Button::Up);
        store.save(KEY, &map);

        let reopened = MappingStore::new(FileStore::open(&path).unwrap());
        assert_eq!(reopened.load(KEY), map);
    }

    #[test]
    fn test_file_store_recovers_from_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "garbage").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert!(store.get(KEY).is_none());

        store.set(KEY, "{}").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(KEY).as_deref(), Some("{}"));
    }
}
