//! # calembed Core
//!
//! Business logic for the tagged calendar embed - no infrastructure
//! dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the calendar API, the shared
//!   cache, the settings store and the viewer privilege check
//! - The category registry and tag validator
//! - The cache key model and cache settings
//! - The visibility policy and the event processing pipeline
//!
//! ## Architecture Principles
//! - Only depends on `calembed-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod cache;
pub mod categories;
pub mod clock;
pub mod events;
pub mod period;

// Re-export specific items to avoid ambiguity
pub use cache::ports::EventCacheStore;
pub use cache::{CacheDuration, CacheKeyModel, CacheSettings, FeedCache};
pub use categories::ports::ConfigStore;
pub use categories::{CategoryRegistry, TagValidator};
pub use clock::{Clock, FixedClock, SystemClock};
pub use events::ports::{CalendarAccess, PrivilegeCheck};
pub use events::{filter_by_tags, EventPipeline};
pub use period::PeriodWindow;
