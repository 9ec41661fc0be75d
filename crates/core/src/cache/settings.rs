//! Cache duration policy and persisted cache settings

use std::sync::Arc;
use std::time::Duration;

use calembed_domain::clamp_cache_duration;
use calembed_domain::constants::{CACHE_KEY_PREFIX, OPTION_CACHE_DURATION};
use calembed_domain::Result;
use serde_json::Value;
use tracing::{info, warn};

use super::ports::EventCacheStore;
use crate::categories::ports::ConfigStore;

/// Feed cache lifetime, always within `[0, MAX_CACHE_DURATION_SECS]`
///
/// Zero means caching is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CacheDuration(u64);

impl CacheDuration {
    pub const DISABLED: Self = Self(0);

    pub fn from_secs(secs: u64) -> Self {
        Self(clamp_cache_duration(secs))
    }

    /// Negative input clamps to zero
    pub fn from_signed_secs(secs: i64) -> Self {
        Self::from_secs(u64::try_from(secs).unwrap_or(0))
    }

    pub fn as_secs(self) -> u64 {
        self.0
    }

    pub fn is_disabled(self) -> bool {
        self.0 == 0
    }

    /// Entry TTL, `None` when caching is disabled
    pub fn ttl(self) -> Option<Duration> {
        (!self.is_disabled()).then(|| Duration::from_secs(self.0))
    }

    fn from_stored(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .map(Self::from_secs)
                .or_else(|| n.as_i64().map(Self::from_signed_secs)),
            Value::String(s) => s.trim().parse::<i64>().ok().map(Self::from_signed_secs),
            _ => None,
        }
    }
}

/// Admin-facing cache controls
pub struct CacheSettings {
    config_store: Arc<dyn ConfigStore>,
    cache_store: Arc<dyn EventCacheStore>,
    fallback: CacheDuration,
}

impl CacheSettings {
    /// `fallback_secs` applies until a duration has been persisted
    pub fn new(
        config_store: Arc<dyn ConfigStore>,
        cache_store: Arc<dyn EventCacheStore>,
        fallback_secs: u64,
    ) -> Self {
        Self { config_store, cache_store, fallback: CacheDuration::from_secs(fallback_secs) }
    }

    /// Effective duration; unreadable stored values fall back to the default
    pub async fn duration(&self) -> Result<CacheDuration> {
        let Some(value) = self.config_store.get(OPTION_CACHE_DURATION).await? else {
            return Ok(self.fallback);
        };
        Ok(CacheDuration::from_stored(&value).unwrap_or_else(|| {
            warn!(stored = %value, "ignoring malformed cache duration setting");
            self.fallback
        }))
    }

    /// Persist a new duration (clamped). Setting zero also drops every
    /// cached feed.
    pub async fn set_duration(&self, secs: i64) -> Result<CacheDuration> {
        let duration = CacheDuration::from_signed_secs(secs);
        self.config_store.set(OPTION_CACHE_DURATION, Value::from(duration.as_secs())).await?;
        info!(requested = secs, cache_duration_secs = duration.as_secs(), "cache duration updated");

        if duration.is_disabled() {
            self.clear_all().await?;
        }
        Ok(duration)
    }

    /// Drop every cached feed; returns the number of removed entries
    pub async fn clear_all(&self) -> Result<usize> {
        let removed = self.cache_store.delete_by_prefix(CACHE_KEY_PREFIX).await?;
        info!(removed, "cleared cached feeds");
        Ok(removed)
    }
}
