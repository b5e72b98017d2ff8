//! Key-value storage capability
//!
//! The provider persists its per-handle counters through this surface:
//! string keys to string values, writes allowed to fail. Shaped after a
//! browser LocalStorage; hosts may back it with whatever they have.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("storage write failed: {0}")]
pub struct StoreError(pub String);

pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store used by the simulated provider, the demo bin and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
