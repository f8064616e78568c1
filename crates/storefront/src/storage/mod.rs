//! Durable key/value storage for client-held state.
//!
//! The storefront persists exactly two values: the cart contents and the
//! currently signed-in user. Each lives in a named slot of a [`KeyValueStore`].
//!
//! # Backends
//!
//! - [`MemoryStore`] - Shared in-process map (tests, ephemeral sessions)
//! - [`FileStore`] - One JSON file per key in a data directory
//!
//! # Failure model
//!
//! Reads fail closed: a slot whose content does not deserialize into the
//! expected schema is treated as empty and removed. Writes are best-effort
//! from the aggregates' point of view; see [`DurableSlot::save_best_effort`].

mod file;
mod memory;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Slot names used by the storefront.
pub mod keys {
    /// Serialized cart lines.
    pub const CART: &str = "cart";

    /// The signed-in user record.
    pub const CURRENT_USER: &str = "currentUser";
}

/// Errors that can occur while reading or writing a durable slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized.
    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Stored content does not match the expected schema.
    #[error("corrupt content in {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Backend is unusable (e.g. a poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string key/value store that survives process restarts.
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Read the raw value of `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value of `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Store handle shared between the aggregates and the auth service.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// A typed view of one slot in a [`KeyValueStore`].
pub struct DurableSlot<T> {
    store: SharedStore,
    key: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> Clone for DurableSlot<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key,
            _value: PhantomData,
        }
    }
}

impl<T> fmt::Debug for DurableSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DurableSlot")
            .field("key", &self.key)
            .field("store", &self.store)
            .finish()
    }
}

impl<T: Serialize + DeserializeOwned> DurableSlot<T> {
    /// Bind a slot to `key` in `store`.
    #[must_use]
    pub const fn new(store: SharedStore, key: &'static str) -> Self {
        Self {
            store,
            key,
            _value: PhantomData,
        }
    }

    /// Read and decode the slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` if the content does not decode, or a
    /// backend error if the store cannot be read.
    pub fn try_load(&self) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get(self.key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: self.key.to_owned(),
                source,
            })
    }

    /// Read the slot, treating any failure as "absent".
    ///
    /// Corrupt content is removed so the next start begins clean.
    pub fn load(&self) -> Option<T> {
        match self.try_load() {
            Ok(value) => value,
            Err(e @ StorageError::Corrupt { .. }) => {
                tracing::warn!(key = self.key, error = %e, "Discarding corrupt stored value");
                if let Err(e) = self.store.remove(self.key) {
                    tracing::warn!(key = self.key, error = %e, "Failed to remove corrupt stored value");
                }
                None
            }
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "Failed to read stored value");
                None
            }
        }
    }

    /// Encode and write `value` to the slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be encoded or written.
    pub fn save(&self, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: self.key.to_owned(),
            source,
        })?;
        self.store.set(self.key, &raw)
    }

    /// Write `value`, logging instead of returning a failure.
    pub fn save_best_effort(&self, value: &T) {
        if let Err(e) = self.save(value) {
            tracing::warn!(key = self.key, error = %e, "Failed to persist value");
        }
    }

    /// Remove the slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(self.key)
    }

    /// Remove the slot, logging instead of returning a failure.
    pub fn clear_best_effort(&self) {
        if let Err(e) = self.clear() {
            tracing::warn!(key = self.key, error = %e, "Failed to clear stored value");
        }
    }
}
