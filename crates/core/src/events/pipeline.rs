//! Event processing pipeline
//!
//! `check cache -> (hit) return | (miss) fetch -> parse -> filter -> store`.
//! Each stage is a plain function over owned data; the pipeline only wires
//! them together and decides what gets cached.

use std::sync::Arc;
use std::time::Instant;

use calembed_domain::{
    CalEmbedError, EmbedConfig, EventFeed, FeedQuery, FeedSource, ProcessedEvent, RawEvent,
    Result, ViewerScope,
};
use chrono_tz::Tz;
use tracing::{debug, error, info, instrument, warn};

use super::parse::process_events;
use super::ports::{CalendarAccess, PrivilegeCheck};
use super::visibility::filter_by_tags;
use crate::cache::{
    hash_fingerprint, CacheDuration, CacheKeyModel, CacheSettings, EventCacheStore, FeedCache,
};
use crate::categories::{CategoryRegistry, TagValidator};
use crate::clock::{Clock, SystemClock};
use crate::period::PeriodWindow;

/// Orchestrates one feed request end to end
pub struct EventPipeline {
    calendar_id: Option<String>,
    timezone: Tz,
    max_results: u32,
    calendar: Arc<dyn CalendarAccess>,
    registry: Arc<CategoryRegistry>,
    settings: Arc<CacheSettings>,
    cache: FeedCache,
    privilege: Arc<dyn PrivilegeCheck>,
    clock: Arc<dyn Clock>,
}

impl EventPipeline {
    /// Create a pipeline for the configured calendar.
    ///
    /// # Errors
    /// Returns `CalEmbedError::Config` when the configured time zone is not
    /// a known IANA name.
    pub fn new(
        config: &EmbedConfig,
        calendar: Arc<dyn CalendarAccess>,
        registry: Arc<CategoryRegistry>,
        settings: Arc<CacheSettings>,
        cache_store: Arc<dyn EventCacheStore>,
        privilege: Arc<dyn PrivilegeCheck>,
    ) -> Result<Self> {
        let timezone = config.timezone.trim().parse::<Tz>().map_err(|_| {
            CalEmbedError::Config(format!("unknown time zone: {}", config.timezone))
        })?;

        Ok(Self {
            calendar_id: config.selected_calendar().map(str::to_string),
            timezone,
            max_results: config.max_results,
            calendar,
            registry,
            settings,
            cache: FeedCache::new(cache_store),
            privilege,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the wall clock (tests pin "today" with this)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Serve one feed request with the privilege check the pipeline was
    /// built with.
    ///
    /// # Errors
    /// Same as [`EventPipeline::run_as`].
    pub async fn run(&self, query: &FeedQuery) -> Result<EventFeed> {
        self.run_as(query, self.privilege.as_ref()).await
    }

    /// Serve one feed request for a viewer resolved by the caller.
    ///
    /// Lets a long-lived pipeline serve viewers with different capabilities.
    ///
    /// # Errors
    /// `NoCalendarSelected` when no calendar is configured, `AuthRequired` or
    /// `FetchError` when the upstream call fails, registry errors when the
    /// whitelist cannot be read. Nothing is cached on error.
    #[instrument(skip(self, query, privilege), fields(period = %query.period, tags = ?query.tags))]
    pub async fn run_as(
        &self,
        query: &FeedQuery,
        privilege: &dyn PrivilegeCheck,
    ) -> Result<EventFeed> {
        let calendar_id = self.selected_calendar()?;
        let privileged = privilege.is_privileged_viewer();
        let scope = ViewerScope::from_privilege(privileged);

        let keys = CacheKeyModel::new(calendar_id, self.timezone, Arc::clone(&self.clock));
        let window = PeriodWindow::resolve(query.period, &query.anchor, keys.today());
        let cache_key = hash_fingerprint(&keys.fingerprint(&window, &query.tags, scope));
        let duration = self.cache_duration().await;

        if query.bypass_cache && !privileged {
            debug!("cache bypass requested by unprivileged viewer, ignoring");
        }
        let bypass = query.bypass_cache && privileged;

        if !bypass {
            let started = Instant::now();
            let cached = self.cache.read(&cache_key, duration).await;
            debug!(stage = "check_cache", hit = cached.is_some(), elapsed_ms = elapsed_ms(started));
            if let Some(events) = cached {
                return Ok(EventFeed { events, source: FeedSource::Cache, cache_key });
            }
        }

        let raw_events = self.fetch(calendar_id, &window).await?;

        let validator = self.validator().await?;
        let started = Instant::now();
        let processed = process_events(&raw_events, &validator);
        debug!(stage = "parse", count = processed.len(), elapsed_ms = elapsed_ms(started));

        let started = Instant::now();
        let visible = filter_by_tags(processed, &query.tags, privileged);
        debug!(stage = "policy_filter", count = visible.len(), elapsed_ms = elapsed_ms(started));

        self.store(&cache_key, &visible, duration).await;

        info!(count = visible.len(), scope = %scope, "feed served from upstream");
        Ok(EventFeed { events: visible, source: FeedSource::Upstream, cache_key })
    }

    /// Display summary of the configured calendar
    pub async fn calendar_summary(&self) -> Result<String> {
        let calendar_id = self.selected_calendar()?;
        let meta = self.calendar.calendar_meta(calendar_id).await.map_err(normalize_fetch_error)?;
        Ok(meta.summary)
    }

    fn selected_calendar(&self) -> Result<&str> {
        self.calendar_id.as_deref().ok_or(CalEmbedError::NoCalendarSelected)
    }

    /// Settings failures disable caching for this request only
    async fn cache_duration(&self) -> CacheDuration {
        match self.settings.duration().await {
            Ok(duration) => duration,
            Err(err) => {
                warn!(error = %err, "cache settings unavailable, caching disabled for request");
                CacheDuration::DISABLED
            }
        }
    }

    async fn fetch(&self, calendar_id: &str, window: &PeriodWindow) -> Result<Vec<RawEvent>> {
        let (time_min, time_max) = window.time_bounds(self.timezone, self.clock.now());
        let started = Instant::now();

        let result = self
            .calendar
            .list_events(calendar_id, time_min, time_max, self.max_results)
            .await
            .map_err(normalize_fetch_error);

        match &result {
            Ok(events) => debug!(
                stage = "fetch",
                count = events.len(),
                %time_min,
                time_max = ?time_max,
                elapsed_ms = elapsed_ms(started)
            ),
            Err(err) => error!(stage = "fetch", error = %err, elapsed_ms = elapsed_ms(started)),
        }
        result
    }

    async fn validator(&self) -> Result<TagValidator> {
        self.registry.validator().await.map_err(|err| {
            error!(error = %err, "failed to load category whitelist");
            err
        })
    }

    async fn store(&self, cache_key: &str, events: &[ProcessedEvent], duration: CacheDuration) {
        let started = Instant::now();
        let written = self.cache.write(cache_key, events, duration).await;
        debug!(stage = "store_cache", written, elapsed_ms = elapsed_ms(started));
    }
}

/// Upstream failures surface as `AuthRequired` or `FetchError`
fn normalize_fetch_error(err: CalEmbedError) -> CalEmbedError {
    match err {
        CalEmbedError::AuthRequired
        | CalEmbedError::NoCalendarSelected
        | CalEmbedError::FetchError { .. } => err,
        other => CalEmbedError::fetch(other.to_string()),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
