//! In-memory settings store

use std::collections::HashMap;

use async_trait::async_trait;
use calembed_core::ConfigStore;
use calembed_domain::Result;
use parking_lot::RwLock;
use serde_json::Value;

/// Process-local [`ConfigStore`]; contents are lost on restart
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a named value
    pub fn with_value(self, name: impl Into<String>, value: Value) -> Self {
        self.values.write().insert(name.into(), value);
        self
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get(&self, name: &str) -> Result<Option<Value>> {
        Ok(self.values.read().get(name).cloned())
    }

    async fn set(&self, name: &str, value: Value) -> Result<()> {
        self.values.write().insert(name.to_string(), value);
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        Ok(self.values.write().remove(name).is_some())
    }
}
