//! Mock settings and cache stores

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use calembed_core::{ConfigStore, EventCacheStore};
use calembed_domain::{CalEmbedError, ProcessedEvent, Result as DomainResult};
use serde_json::Value;

/// In-memory mock for `ConfigStore`.
#[derive(Default, Clone)]
pub struct MockConfigStore {
    values: Arc<Mutex<HashMap<String, Value>>>,
}

impl MockConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience helper for pre-populating a named value.
    pub fn with_value(self, name: &str, value: Value) -> Self {
        self.values.lock().unwrap().insert(name.to_string(), value);
        self
    }

    pub fn value(&self, name: &str) -> Option<Value> {
        self.values.lock().unwrap().get(name).cloned()
    }
}

#[async_trait]
impl ConfigStore for MockConfigStore {
    async fn get(&self, name: &str) -> DomainResult<Option<Value>> {
        Ok(self.value(name))
    }

    async fn set(&self, name: &str, value: Value) -> DomainResult<()> {
        self.values.lock().unwrap().insert(name.to_string(), value);
        Ok(())
    }

    async fn delete(&self, name: &str) -> DomainResult<bool> {
        Ok(self.values.lock().unwrap().remove(name).is_some())
    }
}

/// One stored cache entry
#[derive(Debug, Clone)]
pub struct StoredFeed {
    pub events: Vec<ProcessedEvent>,
    pub ttl: Duration,
}

/// In-memory mock for `EventCacheStore`.
///
/// Entries never expire; the requested TTL is recorded for assertions. When
/// `failing` is set every call returns a storage error.
#[derive(Default, Clone)]
pub struct MockCacheStore {
    entries: Arc<Mutex<HashMap<String, StoredFeed>>>,
    failing: Arc<AtomicBool>,
}

impl MockCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn entry(&self, key: &str) -> Option<StoredFeed> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Insert an entry directly, bypassing the pipeline.
    pub fn seed(&self, key: &str, events: Vec<ProcessedEvent>) {
        let feed = StoredFeed { events, ttl: Duration::from_secs(60) };
        self.entries.lock().unwrap().insert(key.to_string(), feed);
    }

    fn check(&self) -> DomainResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CalEmbedError::Storage("cache backend unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl EventCacheStore for MockCacheStore {
    async fn get(&self, key: &str) -> DomainResult<Option<Vec<ProcessedEvent>>> {
        self.check()?;
        Ok(self.entry(key).map(|feed| feed.events))
    }

    async fn set(&self, key: &str, events: &[ProcessedEvent], ttl: Duration) -> DomainResult<bool> {
        self.check()?;
        let feed = StoredFeed { events: events.to_vec(), ttl };
        self.entries.lock().unwrap().insert(key.to_string(), feed);
        Ok(true)
    }

    async fn delete_by_prefix(&self, prefix: &str) -> DomainResult<usize> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok(before - entries.len())
    }
}
