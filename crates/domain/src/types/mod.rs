//! Domain types and models

pub mod category;
pub mod event;
pub mod feed;
pub mod query;

pub use category::{CategoryEntry, CategoryId};
pub use event::{EventTime, ProcessedEvent, ProcessedEventParts, RawEvent, TagExtraction};
pub use feed::{CalendarMeta, EventFeed, FeedSource};
pub use query::{FeedQuery, Period, PeriodAnchor, QueryFingerprint, ViewerScope};
