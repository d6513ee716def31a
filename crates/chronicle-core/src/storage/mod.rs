//! String-keyed blob storage for persisted front-end state.
//!
//! Containers serialise themselves to JSON and hand the text to a
//! [`KeyValueStore`]. Nothing here knows which containers exist.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Result;

/// Minimal get/set/remove contract over string keys and string values
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Read and deserialize a JSON blob
///
/// Missing keys yield `Ok(None)`; a blob that does not parse is an error so
/// the caller can decide whether to fall back to defaults.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize a value and store it under `key`
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Load a blob, falling back to `T::default()` when it is missing or corrupt
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match load_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!("Failed to load {}: {}", key, e);
            T::default()
        }
    }
}
