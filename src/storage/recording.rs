//! Store wrapper that logs every write, for ordering checks in tests

use std::cell::RefCell;

use super::{KeyValueStore, MemoryStorage, Result};

#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryStorage,
    ops: RefCell<Vec<String>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &MemoryStorage {
        &self.inner
    }

    /// Writes so far as `"set <key>"` / `"delete <key>"`, then forget them
    pub fn take_ops(&self) -> Vec<String> {
        self.ops.take()
    }
}

impl KeyValueStore for RecordingStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ops.borrow_mut().push(format!("set {key}"));
        self.inner.set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.ops.borrow_mut().push(format!("delete {key}"));
        self.inner.delete(key)
    }
}
