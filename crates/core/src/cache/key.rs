//! Cache key model
//!
//! A feed is identified by calendar, period, date bucket, requested tag set
//! and viewer scope. The key is a SHA-256 fingerprint of those inputs after
//! normalization, so tag permutations and casing differences collide while
//! anything else that changes the result does not.

use std::sync::Arc;

use calembed_domain::constants::CACHE_KEY_PREFIX;
use calembed_domain::{normalize_tag_filter, Period, PeriodAnchor, QueryFingerprint, ViewerScope};
use chrono::NaiveDate;
use chrono_tz::Tz;
use sha2::{Digest, Sha256};

use crate::clock::Clock;
use crate::period::{local_today, PeriodWindow};

/// Builds cache keys for one calendar
#[derive(Clone)]
pub struct CacheKeyModel {
    calendar_id: String,
    timezone: Tz,
    clock: Arc<dyn Clock>,
}

impl CacheKeyModel {
    pub fn new(calendar_id: impl Into<String>, timezone: Tz, clock: Arc<dyn Clock>) -> Self {
        Self { calendar_id: calendar_id.into(), timezone, clock }
    }

    /// Site-local date used for "current" buckets
    pub fn today(&self) -> NaiveDate {
        local_today(self.timezone, self.clock.now())
    }

    /// Date bucket label for `period`
    pub fn date_bucket(&self, period: Period, anchor: &PeriodAnchor) -> String {
        PeriodWindow::resolve(period, anchor, self.today()).bucket
    }

    /// Normalized query inputs for an already-resolved window
    pub fn fingerprint<S: AsRef<str>>(
        &self,
        window: &PeriodWindow,
        tags: &[S],
        scope: ViewerScope,
    ) -> QueryFingerprint {
        QueryFingerprint {
            calendar_id: self.calendar_id.clone(),
            period: window.period,
            date_bucket: window.bucket.clone(),
            tags: normalize_tag_filter(tags),
            scope,
        }
    }

    /// Cache key for a query, resolving "current" against the clock
    pub fn generate_key<S: AsRef<str>>(
        &self,
        period: Period,
        tags: &[S],
        anchor: &PeriodAnchor,
        scope: ViewerScope,
    ) -> String {
        let window = PeriodWindow::resolve(period, anchor, self.today());
        hash_fingerprint(&self.fingerprint(&window, tags, scope))
    }
}

/// Prefixed hex SHA-256 of the fingerprint's canonical form
pub fn hash_fingerprint(fingerprint: &QueryFingerprint) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fingerprint.canonical().as_bytes());
    format!("{CACHE_KEY_PREFIX}{}", hex::encode(hasher.finalize()))
}
