use async_trait::async_trait;
use playbook_core::model::LessonKey;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Reserved storage key holding the serialized completed-lesson set.
pub const PROGRESS_KEY: &str = "playbook.progress";

/// Reserved storage key holding the preferred locale code.
pub const LOCALE_KEY: &str = "playbook.locale";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable key-value substrate.
///
/// Values are opaque bytes; callers own the encoding.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write is rejected.
    async fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

/// Persisted shape of the completed-lesson set.
///
/// Encoded as a JSON array of `"<sectionId>/<slug>"` strings in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressRecord {
    pub completed: BTreeSet<LessonKey>,
}

/// A decoded record plus the raw entries that were not valid lesson keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedProgress {
    pub record: ProgressRecord,
    pub skipped: Vec<String>,
}

impl ProgressRecord {
    #[must_use]
    pub fn new(completed: BTreeSet<LessonKey>) -> Self {
        Self { completed }
    }

    /// Serialize the record for the key-value store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if JSON encoding fails.
    pub fn encode(&self) -> Result<Vec<u8>, StorageError> {
        let keys: Vec<String> = self.completed.iter().map(ToString::to_string).collect();
        serde_json::to_vec(&keys).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Parse a stored payload.
    ///
    /// Entries that are not valid lesson keys are reported in `skipped`
    /// rather than failing the whole record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the payload is not a JSON
    /// array of strings.
    pub fn decode(bytes: &[u8]) -> Result<DecodedProgress, StorageError> {
        let raw: Vec<String> = serde_json::from_slice(bytes)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let mut decoded = DecodedProgress::default();
        for entry in raw {
            match entry.parse::<LessonKey>() {
                Ok(key) => {
                    decoded.record.completed.insert(key);
                }
                Err(_) => decoded.skipped.push(entry),
            }
        }
        Ok(decoded)
    }
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_vec());
        Ok(())
    }
}

/// Aggregates the persistence substrate behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub kv: Arc<dyn KeyValueStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let kv: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
        Self { kv }
    }
}
