//! Mock calendar access and privilege check

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use calembed_core::{CalendarAccess, PrivilegeCheck};
use calembed_domain::{CalEmbedError, CalendarMeta, RawEvent, Result as DomainResult};
use chrono::{DateTime, Utc};

/// Bounds recorded from the last `list_events` call
pub type FetchBounds = (DateTime<Utc>, Option<DateTime<Utc>>);

/// In-memory mock for `CalendarAccess`.
///
/// Returns a fixed list of events, counts calls and remembers the last
/// requested window. A configured failure is returned instead of events.
#[derive(Default, Clone)]
pub struct MockCalendar {
    events: Arc<Vec<RawEvent>>,
    failure: Arc<Mutex<Option<CalEmbedError>>>,
    calls: Arc<AtomicUsize>,
    last_bounds: Arc<Mutex<Option<FetchBounds>>>,
    summary: String,
}

impl MockCalendar {
    /// Create a new mock serving the provided events.
    pub fn new(events: Vec<RawEvent>) -> Self {
        Self { events: Arc::new(events), summary: "Community Calendar".into(), ..Self::default() }
    }

    /// Make every subsequent call fail with `error`.
    pub fn fail_with(&self, error: CalEmbedError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_bounds(&self) -> Option<FetchBounds> {
        *self.last_bounds.lock().unwrap()
    }

    fn check_failure(&self) -> DomainResult<()> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CalendarAccess for MockCalendar {
    async fn list_events(
        &self,
        _calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: Option<DateTime<Utc>>,
        max_results: u32,
    ) -> DomainResult<Vec<RawEvent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_bounds.lock().unwrap() = Some((time_min, time_max));
        self.check_failure()?;
        Ok(self.events.iter().take(max_results as usize).cloned().collect())
    }

    async fn calendar_meta(&self, _calendar_id: &str) -> DomainResult<CalendarMeta> {
        self.check_failure()?;
        Ok(CalendarMeta { summary: self.summary.clone() })
    }
}

/// Toggleable viewer privilege.
#[derive(Default, Clone)]
pub struct MockPrivilege {
    privileged: Arc<AtomicBool>,
}

impl MockPrivilege {
    pub fn new(privileged: bool) -> Self {
        Self { privileged: Arc::new(AtomicBool::new(privileged)) }
    }

    pub fn set(&self, privileged: bool) {
        self.privileged.store(privileged, Ordering::SeqCst);
    }
}

impl PrivilegeCheck for MockPrivilege {
    fn is_privileged_viewer(&self) -> bool {
        self.privileged.load(Ordering::SeqCst)
    }
}
