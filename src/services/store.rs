//! Key-value persistence.
//!
//! The host supplies the actual storage; the core stores JSON strings
//! under a handful of fixed keys.

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Storage keys.
pub mod keys {
    pub const GAME_STATS: &str = "gameStats";
    pub const GARDEN_DATA: &str = "gardenData";
    pub const SOUND_ENABLED: &str = "soundEnabled";
    pub const HAPTIC_ENABLED: &str = "hapticEnabled";
}

/// Durable string storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove several keys. Missing keys are not an error.
    fn remove_many(&mut self, keys: &[&str]) -> Result<(), StoreError>;
}

/// Read and decode a JSON value. `Ok(None)` when the key is absent.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, raw)
}

/// In-process store. Nothing survives the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<(), StoreError> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }
}
