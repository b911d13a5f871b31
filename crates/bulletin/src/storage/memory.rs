//! In-memory key-value store.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

use super::KeyValueStore;

/// A `BTreeMap`-backed store.
///
/// Writes can be made to fail with [`MemoryStore::fail_writes`], which
/// stands in for a full disk or exhausted quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one value.
    #[must_use]
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.items.insert(key.to_string(), value.to_string());
        store
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes and removals so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Io(std::io::Error::other("store quota exceeded")));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.items.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<bool> {
        self.check_writable()?;
        self.writes += 1;
        Ok(self.items.remove(key).is_some())
    }
}
