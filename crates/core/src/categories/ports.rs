//! Port interfaces for persisted settings
//!
//! The category whitelist and the cache duration live in a host-owned
//! key/value settings store (the embedding site's options table).

use async_trait::async_trait;
use calembed_domain::Result;
use serde_json::Value;

/// Trait for the persistent named-value settings store
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read a named value, `None` when it was never set
    async fn get(&self, name: &str) -> Result<Option<Value>>;

    /// Replace a named value as a whole
    async fn set(&self, name: &str, value: Value) -> Result<()>;

    /// Remove a named value; returns whether it existed
    async fn delete(&self, name: &str) -> Result<bool>;
}
