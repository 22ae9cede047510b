//! Durable key-value slots
//!
//! Backends:
//! - `MemoryStorage`: process-local map (tests, throwaway sessions)
//! - `FileStorage`: JSON object on disk (native)
//! - `LocalStorage`: browser LocalStorage (wasm32)
//!
//! All methods take `&self` so several bindings can share one store.

pub mod file;
pub mod memory;
#[cfg(test)]
pub(crate) mod recording;
#[cfg(target_arch = "wasm32")]
pub mod local;

use std::rc::Rc;

use thiserror::Error;

pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// Failure talking to the backing store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage is not available")]
    Unavailable,

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Convenience Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// A flat namespace of text slots
pub trait KeyValueStore {
    /// Read a slot, `None` if it does not exist
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Create or overwrite a slot
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot. Removing a missing slot is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}
