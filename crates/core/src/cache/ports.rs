//! Port interfaces for the shared feed cache

use std::time::Duration;

use async_trait::async_trait;
use calembed_domain::{ProcessedEvent, Result};

/// Trait for the shared key/value store holding processed feeds
///
/// Implementations must write each entry as a whole; readers never observe a
/// partially written list.
#[async_trait]
pub trait EventCacheStore: Send + Sync {
    /// Get a live entry, `None` on miss or expiry
    async fn get(&self, key: &str) -> Result<Option<Vec<ProcessedEvent>>>;

    /// Store an entry for `ttl`; returns whether the write was accepted
    async fn set(&self, key: &str, events: &[ProcessedEvent], ttl: Duration) -> Result<bool>;

    /// Drop every entry whose key starts with `prefix`; returns the count
    async fn delete_by_prefix(&self, prefix: &str) -> Result<usize>;
}
