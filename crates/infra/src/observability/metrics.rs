//! Feed cache counters
//!
//! Plain atomics, no locking. Counters use SeqCst so [`CacheMetrics::snapshot`]
//! sees hits and misses from the same moment.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

/// Counters for one cache store
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicUsize,
    misses: AtomicUsize,
    writes: AtomicUsize,
    invalidations: AtomicUsize,
}

/// Point-in-time copy of [`CacheMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub writes: usize,
    pub invalidations: usize,
    /// Percentage (0.0 to 100.0); 0.0 before any lookup
    pub hit_rate: f64,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_invalidations(&self, count: usize) {
        self.invalidations.fetch_add(count, Ordering::SeqCst);
    }

    /// `hits / (hits + misses) * 100`
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::SeqCst);
        let misses = self.misses.load(Ordering::SeqCst);
        percentage(hits, hits + misses)
    }

    pub fn snapshot(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::SeqCst);
        let misses = self.misses.load(Ordering::SeqCst);
        CacheStats {
            hits,
            misses,
            writes: self.writes.load(Ordering::SeqCst),
            invalidations: self.invalidations.load(Ordering::SeqCst),
            hit_rate: percentage(hits, hits + misses),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64) * 100.0
}
