//! A value bound to one storage slot

use std::fmt;

use super::codec::{Codec, JsonCodec};
use super::PersistError;
use crate::storage::KeyValueStore;

/// Default used when the slot is missing or unreadable
pub enum Initial<T> {
    Value(T),
    /// Called at most once, only when the default is needed
    Lazy(Box<dyn FnOnce() -> T>),
}

impl<T> Initial<T> {
    pub fn lazy(f: impl FnOnce() -> T + 'static) -> Self {
        Initial::Lazy(Box::new(f))
    }

    fn resolve(self) -> T {
        match self {
            Initial::Value(value) => value,
            Initial::Lazy(f) => f(),
        }
    }
}

impl<T> From<T> for Initial<T> {
    fn from(value: T) -> Self {
        Initial::Value(value)
    }
}

/// New value for [`PersistentState::set`]
pub enum Update<T> {
    Set(T),
    /// Computes the next value from the current one
    With(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Update<T> {
    pub fn with(f: impl FnOnce(&T) -> T + 'static) -> Self {
        Update::With(Box::new(f))
    }

    fn apply(self, current: &T) -> T {
        match self {
            Update::Set(value) => value,
            Update::With(f) => f(current),
        }
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Update::Set(value)
    }
}

/// Keeps a value mirrored in the slot named by `key`.
///
/// - Loading never fails: a corrupt slot is deleted and the default used
/// - Every `set` writes the new value through the codec
/// - Moving to a new key deletes the old slot before writing the new one,
///   so one binding owns exactly one slot
pub struct PersistentState<T, S, C = JsonCodec<T>> {
    store: S,
    codec: C,
    key: String,
    /// Key the slot was last written under
    persisted_key: String,
    value: T,
}

impl<T, S> PersistentState<T, S>
where
    S: KeyValueStore,
    JsonCodec<T>: Codec<T>,
{
    /// Bind with the JSON codec
    pub fn new(store: S, key: impl Into<String>, initial: Initial<T>) -> Self {
        Self::with_codec(store, key, initial, JsonCodec::new())
    }
}

impl<T, S, C> PersistentState<T, S, C>
where
    S: KeyValueStore,
    C: Codec<T>,
{
    /// Bind with a custom codec. Reads the slot but does not write it.
    pub fn with_codec(
        store: S,
        key: impl Into<String>,
        initial: Initial<T>,
        codec: C,
    ) -> Self {
        let key = key.into();
        let value = match load(&store, &codec, &key) {
            Some(value) => value,
            None => initial.resolve(),
        };
        Self {
            store,
            codec,
            persisted_key: key.clone(),
            key,
            value,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the value and write it to the slot
    pub fn set(&mut self, update: impl Into<Update<T>>) -> Result<(), PersistError> {
        self.value = update.into().apply(&self.value);
        self.persist()
    }

    /// Move the binding to `key`, migrating the slot
    pub fn set_key(&mut self, key: impl Into<String>) -> Result<(), PersistError> {
        let key = key.into();
        if key == self.key {
            return Ok(());
        }
        self.key = key;
        self.persist()
    }

    /// Write the current value under the current key.
    ///
    /// If the key moved since the last write, the old slot goes first.
    pub fn persist(&mut self) -> Result<(), PersistError> {
        // Encode before touching storage so a failure leaves the old slot intact
        let text = self.codec.encode(&self.value).map_err(PersistError::Encode)?;
        if self.persisted_key != self.key {
            log::info!("Migrating slot {:?} -> {:?}", self.persisted_key, self.key);
            self.store.delete(&self.persisted_key)?;
        }
        self.store.set(&self.key, &text)?;
        self.persisted_key = self.key.clone();
        log::debug!("Persisted {:?} ({} bytes)", self.key, text.len());
        Ok(())
    }

    /// Delete the slot, keeping the in-memory value
    pub fn clear(&mut self) -> Result<(), PersistError> {
        self.store.delete(&self.key)?;
        Ok(())
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Read and decode the slot. Corrupt slots are removed.
fn load<T, S: KeyValueStore, C: Codec<T>>(store: &S, codec: &C, key: &str) -> Option<T> {
    let text = match store.get(key) {
        Ok(Some(text)) if !text.is_empty() => text,
        Ok(_) => return None,
        Err(e) => {
            log::warn!("Could not read {:?}, using default: {}", key, e);
            return None;
        }
    };
    match codec.decode(&text) {
        Ok(value) => {
            log::info!("Loaded {:?} from storage", key);
            Some(value)
        }
        Err(e) => {
            log::warn!("Discarding corrupt slot {:?}: {}", key, e);
            if let Err(e) = store.delete(key) {
                log::warn!("Could not delete corrupt slot {:?}: {}", key, e);
            }
            None
        }
    }
}

impl<T: fmt::Debug, S, C> fmt::Debug for PersistentState<T, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentState")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}
