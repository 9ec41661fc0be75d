//! Port interfaces for the event pipeline
//!
//! These traits define the boundaries between the pipeline and the host
//! integration (calendar API client, session/capability checks).

use async_trait::async_trait;
use calembed_domain::{CalendarMeta, RawEvent, Result};
use chrono::{DateTime, Utc};

/// Trait for reading events from the upstream calendar
///
/// Implementations own request timeouts and credential handling. A missing
/// or revoked credential is reported as `CalEmbedError::AuthRequired`.
#[async_trait]
pub trait CalendarAccess: Send + Sync {
    /// List events ordered by start time with recurring series expanded
    ///
    /// # Arguments
    /// * `calendar_id` - Upstream calendar identifier
    /// * `time_min` - Inclusive lower bound
    /// * `time_max` - Exclusive upper bound, `None` for open-ended
    /// * `max_results` - Upper limit on returned events
    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: Option<DateTime<Utc>>,
        max_results: u32,
    ) -> Result<Vec<RawEvent>>;

    /// Fetch calendar metadata (display summary)
    async fn calendar_meta(&self, calendar_id: &str) -> Result<CalendarMeta>;
}

/// Trait for checking the current viewer's capabilities
pub trait PrivilegeCheck: Send + Sync {
    /// Whether the viewer may see untagged and mis-tagged events
    fn is_privileged_viewer(&self) -> bool;
}
