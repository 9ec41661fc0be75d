//! Pipeline output types

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::event::ProcessedEvent;

/// Where a feed's events came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum FeedSource {
    Cache,
    Upstream,
}

/// Ordered, policy-filtered events for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
pub struct EventFeed {
    pub events: Vec<ProcessedEvent>,
    pub source: FeedSource,
    pub cache_key: String,
}

impl EventFeed {
    pub fn is_from_cache(&self) -> bool {
        self.source == FeedSource::Cache
    }
}

/// Calendar metadata shown above the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
pub struct CalendarMeta {
    pub summary: String,
}
