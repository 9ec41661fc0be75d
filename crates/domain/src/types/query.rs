//! Feed query types

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::impl_keyword_conversions;

/// Time span a feed covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum Period {
    Week,
    Month,
    Year,
    Future,
}

impl_keyword_conversions!(Period {
    Week => "week",
    Month => "month",
    Year => "year",
    Future => "future",
});

/// Explicit navigation target; missing parts default to "current"
///
/// `week` is an ISO-8601 week number and only applies together with `year`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAnchor {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub week: Option<u32>,
}

impl PeriodAnchor {
    pub fn current() -> Self {
        Self::default()
    }

    pub fn year(year: i32) -> Self {
        Self { year: Some(year), ..Self::default() }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self { year: Some(year), month: Some(month), week: None }
    }

    pub fn iso_week(year: i32, week: u32) -> Self {
        Self { year: Some(year), month: None, week: Some(week) }
    }
}

/// Which visibility rules produced a cached list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerScope {
    Public,
    Privileged,
}

impl_keyword_conversions!(ViewerScope {
    Public => "public",
    Privileged => "privileged",
});

impl ViewerScope {
    pub fn from_privilege(is_privileged: bool) -> Self {
        if is_privileged {
            Self::Privileged
        } else {
            Self::Public
        }
    }
}

/// One feed request from a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    pub period: Period,
    #[serde(default)]
    pub anchor: PeriodAnchor,
    /// Requested category filter (any casing, OR semantics)
    #[serde(default)]
    pub tags: Vec<String>,
    /// Debug override: skip the cache read for this request only
    #[serde(default)]
    pub bypass_cache: bool,
}

impl FeedQuery {
    pub fn new(period: Period) -> Self {
        Self { period, anchor: PeriodAnchor::current(), tags: Vec::new(), bypass_cache: false }
    }

    pub fn with_anchor(mut self, anchor: PeriodAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn bypassing_cache(mut self) -> Self {
        self.bypass_cache = true;
        self
    }
}

/// Normalized inputs that identify a cached feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFingerprint {
    pub calendar_id: String,
    pub period: Period,
    pub date_bucket: String,
    /// Uppercased, deduplicated, sorted
    pub tags: Vec<String>,
    pub scope: ViewerScope,
}

impl QueryFingerprint {
    /// Pipe-joined material fed to the key hash
    ///
    /// Separators inside free-form values are backslash-escaped, so distinct
    /// fingerprints never share a canonical form (`["A,B"]` vs `["A", "B"]`).
    pub fn canonical(&self) -> String {
        let tags: Vec<String> = self.tags.iter().map(|tag| escape_field(tag)).collect();
        format!(
            "{}|{}|{}|{}|{}",
            escape_field(&self.calendar_id),
            self.period,
            escape_field(&self.date_bucket),
            tags.join(","),
            self.scope
        )
    }
}

fn escape_field(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '|' | ',') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
