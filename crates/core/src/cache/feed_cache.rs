//! Feed cache access used by the pipeline
//!
//! Store failures never fail a request: a read error is a miss and a write
//! error is a skipped write.

use std::sync::Arc;

use calembed_domain::ProcessedEvent;
use tracing::{debug, warn};

use super::ports::EventCacheStore;
use super::settings::CacheDuration;

#[derive(Clone)]
pub struct FeedCache {
    store: Arc<dyn EventCacheStore>,
}

impl FeedCache {
    pub fn new(store: Arc<dyn EventCacheStore>) -> Self {
        Self { store }
    }

    /// Cached events for `key`, `None` on miss or when caching is disabled
    pub async fn read(&self, key: &str, duration: CacheDuration) -> Option<Vec<ProcessedEvent>> {
        if duration.is_disabled() {
            debug!(cache_key = key, "cache disabled, forcing miss");
            return None;
        }

        match self.store.get(key).await {
            Ok(hit) => hit,
            Err(err) => {
                warn!(cache_key = key, error = %err, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Store `events` for the configured duration; returns whether it was
    /// written
    pub async fn write(
        &self,
        key: &str,
        events: &[ProcessedEvent],
        duration: CacheDuration,
    ) -> bool {
        let Some(ttl) = duration.ttl() else {
            debug!(cache_key = key, "cache disabled, skipping write");
            return false;
        };

        match self.store.set(key, events, ttl).await {
            Ok(written) => written,
            Err(err) => {
                warn!(cache_key = key, error = %err, "cache write failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use calembed_domain::{CalEmbedError, Result};

    use super::*;

    /// Answers every read with an empty hit, or fails everything
    #[derive(Default)]
    struct StubStore {
        failing: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EventCacheStore for StubStore {
        async fn get(&self, _key: &str) -> Result<Option<Vec<ProcessedEvent>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing {
                return Err(CalEmbedError::Storage("connection reset".into()));
            }
            Ok(Some(Vec::new()))
        }

        async fn set(
            &self,
            _key: &str,
            _events: &[ProcessedEvent],
            _ttl: Duration,
        ) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing {
                return Err(CalEmbedError::Storage("connection reset".into()));
            }
            Ok(true)
        }

        async fn delete_by_prefix(&self, _prefix: &str) -> Result<usize> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn disabled_duration_skips_the_store() {
        let store = Arc::new(StubStore::default());
        let cache = FeedCache::new(store.clone());

        assert_eq!(cache.read("k", CacheDuration::DISABLED).await, None);
        assert!(!cache.write("k", &[], CacheDuration::DISABLED).await);
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn enabled_duration_reaches_the_store() {
        let cache = FeedCache::new(Arc::new(StubStore::default()));
        let duration = CacheDuration::from_secs(60);

        assert_eq!(cache.read("k", duration).await, Some(Vec::new()));
        assert!(cache.write("k", &[], duration).await);
    }

    #[tokio::test]
    async fn store_errors_degrade() {
        let store = Arc::new(StubStore { failing: true, ..StubStore::default() });
        let cache = FeedCache::new(store.clone());
        let duration = CacheDuration::from_secs(60);

        assert_eq!(cache.read("k", duration).await, None);
        assert!(!cache.write("k", &[], duration).await);
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }
}
