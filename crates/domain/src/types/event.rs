//! Calendar event types
//!
//! [`RawEvent`] is what the calendar collaborator hands us. [`ProcessedEvent`]
//! is the annotated, immutable record served to renderers.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::category::CategoryId;

/// Start or end of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum EventTime {
    /// Whole-day boundary (upstream end dates are exclusive)
    AllDay(NaiveDate),
    /// Exact instant
    Timed(DateTime<Utc>),
}

impl EventTime {
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay(_))
    }

    /// Calendar date of this boundary (UTC for timed values)
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::AllDay(date) => *date,
            Self::Timed(instant) => instant.date_naive(),
        }
    }

    /// Instant used for ordering; all-day values sort at UTC midnight
    pub fn sort_instant(&self) -> DateTime<Utc> {
        match self {
            Self::AllDay(date) => date.and_time(NaiveTime::MIN).and_utc(),
            Self::Timed(instant) => *instant,
        }
    }
}

/// Event as returned by the calendar collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: String,
    pub title: Option<String>,
    pub raw_description: Option<String>,
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    pub html_link: Option<String>,
}

impl RawEvent {
    /// An event is all-day when either boundary is a bare date
    pub fn is_all_day(&self) -> bool {
        self.start.is_all_day() || self.end.is_all_day()
    }
}

/// Tag classification of one description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagExtraction {
    pub valid: BTreeSet<CategoryId>,
    pub invalid: BTreeSet<CategoryId>,
}

impl TagExtraction {
    pub fn is_empty(&self) -> bool {
        self.valid.is_empty() && self.invalid.is_empty()
    }
}

/// Annotated event served to renderers
///
/// The two tag-state flags are derived in [`ProcessedEvent::new`] and cannot
/// be set independently of the tag sets. Deserializing ignores stored flags
/// and derives them again from the tag sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredEvent")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
pub struct ProcessedEvent {
    id: String,
    title: String,
    clean_description: String,
    location: String,
    start: EventTime,
    end: EventTime,
    is_all_day: bool,
    valid_tags: BTreeSet<CategoryId>,
    invalid_tags: BTreeSet<CategoryId>,
    is_untagged: bool,
    has_unknown_tags_only: bool,
    html_link: String,
    map_link: String,
}

/// Serialized form read back from caches; the derived flags are not trusted
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEvent {
    id: String,
    title: String,
    clean_description: String,
    location: String,
    start: EventTime,
    end: EventTime,
    is_all_day: bool,
    valid_tags: BTreeSet<CategoryId>,
    invalid_tags: BTreeSet<CategoryId>,
    html_link: String,
    map_link: String,
}

impl From<StoredEvent> for ProcessedEvent {
    fn from(stored: StoredEvent) -> Self {
        Self::new(ProcessedEventParts {
            id: stored.id,
            title: stored.title,
            clean_description: stored.clean_description,
            location: stored.location,
            start: stored.start,
            end: stored.end,
            is_all_day: stored.is_all_day,
            tags: TagExtraction { valid: stored.valid_tags, invalid: stored.invalid_tags },
            html_link: stored.html_link,
            map_link: stored.map_link,
        })
    }
}

/// Owned inputs for [`ProcessedEvent::new`]
#[derive(Debug, Clone)]
pub struct ProcessedEventParts {
    pub id: String,
    pub title: String,
    pub clean_description: String,
    pub location: String,
    pub start: EventTime,
    pub end: EventTime,
    pub is_all_day: bool,
    pub tags: TagExtraction,
    pub html_link: String,
    pub map_link: String,
}

impl ProcessedEvent {
    pub fn new(parts: ProcessedEventParts) -> Self {
        let ProcessedEventParts {
            id,
            title,
            clean_description,
            location,
            start,
            end,
            is_all_day,
            tags,
            html_link,
            map_link,
        } = parts;

        let is_untagged = tags.is_empty();
        let has_unknown_tags_only = !tags.invalid.is_empty() && tags.valid.is_empty();

        Self {
            id,
            title,
            clean_description,
            location,
            start,
            end,
            is_all_day,
            valid_tags: tags.valid,
            invalid_tags: tags.invalid,
            is_untagged,
            has_unknown_tags_only,
            html_link,
            map_link,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn clean_description(&self) -> &str {
        &self.clean_description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn start(&self) -> EventTime {
        self.start
    }

    pub fn end(&self) -> EventTime {
        self.end
    }

    pub fn is_all_day(&self) -> bool {
        self.is_all_day
    }

    pub fn valid_tags(&self) -> &BTreeSet<CategoryId> {
        &self.valid_tags
    }

    /// Display hint only, never a filter dimension
    pub fn invalid_tags(&self) -> &BTreeSet<CategoryId> {
        &self.invalid_tags
    }

    pub fn is_untagged(&self) -> bool {
        self.is_untagged
    }

    pub fn has_unknown_tags_only(&self) -> bool {
        self.has_unknown_tags_only
    }

    pub fn has_valid_tags(&self) -> bool {
        !self.valid_tags.is_empty()
    }

    pub fn html_link(&self) -> &str {
        &self.html_link
    }

    pub fn map_link(&self) -> &str {
        &self.map_link
    }
}
