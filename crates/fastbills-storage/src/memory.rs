//! In-memory gateway implementation.
//!
//! Used by the test suites and by ephemeral sessions that do not want
//! durable state. Same contract as the file gateway, minus the disk.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StorageError;
use crate::gateway::StorageGateway;

/// HashMap-backed storage.
///
/// The mutex is held only for the map operation itself, never across an
/// await point, so a plain `std::sync::Mutex` is the right tool here.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageGateway for MemoryStorage {
    async fn save(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().expect("storage mutex poisoned");
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let entries = self.entries.lock().expect("storage mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().expect("storage mutex poisoned");
        entries.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> bool {
        let entries = self.entries.lock().expect("storage mutex poisoned");
        entries.contains_key(key)
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().expect("storage mutex poisoned");
        entries.clear();
        Ok(())
    }
}
