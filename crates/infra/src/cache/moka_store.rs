//! Processed feed cache backed by moka
//!
//! Shared in-process key/value store for processed event lists.
//!
//! # Architecture
//!
//! - **Per-entry TTL**: every `set` carries its own lifetime, enforced through
//!   a moka [`Expiry`] policy, so a changed cache duration applies to new
//!   writes without rebuilding the cache
//! - **Whole-entry writes**: values are immutable `Arc` lists; readers never
//!   see a partial list
//! - **Prefix invalidation**: `delete_by_prefix` scans the live keys
//!
//! # Example
//!
//! ```rust,ignore
//! use calembed_infra::cache::{MokaCacheConfig, MokaEventCache};
//!
//! let cache = MokaEventCache::new(MokaCacheConfig::default());
//! cache.set("calembed_events_...", &events, Duration::from_secs(300)).await?;
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use calembed_core::EventCacheStore;
use calembed_domain::{ProcessedEvent, Result};
use moka::sync::Cache;
use moka::Expiry;

use crate::observability::CacheMetrics;

/// Default max capacity (number of cached feeds)
///
/// Override via `CALEMBED_CACHE_MAX_CAPACITY` environment variable
pub const DEFAULT_FEED_CACHE_MAX_CAPACITY: u64 = 1000;

/// Feed cache configuration
#[derive(Debug, Clone)]
pub struct MokaCacheConfig {
    /// Maximum number of cached feeds
    pub max_capacity: u64,
}

impl Default for MokaCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: std::env::var("CALEMBED_CACHE_MAX_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_FEED_CACHE_MAX_CAPACITY),
        }
    }
}

impl MokaCacheConfig {
    /// Create config with a fixed capacity (useful for testing)
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self { max_capacity }
    }

    /// Log configuration at startup
    pub fn log_config(&self) {
        tracing::info!(max_capacity = self.max_capacity, "Feed cache configuration loaded");
    }
}

#[derive(Clone)]
struct CachedFeed {
    events: Arc<Vec<ProcessedEvent>>,
    ttl: Duration,
}

/// Expire each entry after the TTL it was written with
struct PerEntryTtl;

impl Expiry<String, CachedFeed> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedFeed,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedFeed,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-memory [`EventCacheStore`]
pub struct MokaEventCache {
    cache: Cache<String, CachedFeed>,
    metrics: Arc<CacheMetrics>,
}

impl MokaEventCache {
    pub fn new(config: MokaCacheConfig) -> Self {
        config.log_config();
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl)
            .build();
        Self { cache, metrics: Arc::new(CacheMetrics::new()) }
    }

    /// Hit/miss counters for this store
    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Live entry count (approximate until pending maintenance runs)
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for MokaEventCache {
    fn default() -> Self {
        Self::new(MokaCacheConfig::default())
    }
}

#[async_trait]
impl EventCacheStore for MokaEventCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<ProcessedEvent>>> {
        match self.cache.get(key) {
            Some(feed) => {
                self.metrics.record_hit();
                tracing::debug!(cache_key = key, count = feed.events.len(), "feed cache hit");
                Ok(Some(feed.events.as_ref().clone()))
            }
            None => {
                self.metrics.record_miss();
                tracing::debug!(cache_key = key, "feed cache miss");
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, events: &[ProcessedEvent], ttl: Duration) -> Result<bool> {
        if ttl.is_zero() {
            return Ok(false);
        }
        let feed = CachedFeed { events: Arc::new(events.to_vec()), ttl };
        self.cache.insert(key.to_string(), feed);
        self.metrics.record_write();
        Ok(true)
    }

    async fn delete_by_prefix(&self, prefix: &str) -> Result<usize> {
        let doomed: Vec<Arc<String>> = self
            .cache
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key)
            .collect();

        for key in &doomed {
            self.cache.invalidate(key.as_str());
        }
        self.metrics.record_invalidations(doomed.len());
        tracing::debug!(prefix, removed = doomed.len(), "feed cache entries invalidated");
        Ok(doomed.len())
    }
}
