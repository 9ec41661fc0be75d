//! Embed configuration structures

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CACHE_DURATION_SECS, DEFAULT_MAX_RESULTS, DEFAULT_TIMEZONE, MAX_CACHE_DURATION_SECS,
};

/// Site-level settings for one embedded calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Upstream calendar id; `None` until an administrator selects one
    #[serde(default)]
    pub calendar_id: Option<String>,
    /// IANA zone used for period windows and cache buckets
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_cache_duration")]
    pub cache_duration_secs: u64,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            calendar_id: None,
            timezone: default_timezone(),
            cache_duration_secs: DEFAULT_CACHE_DURATION_SECS,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl EmbedConfig {
    /// Calendar id, treating blank strings as "not selected"
    pub fn selected_calendar(&self) -> Option<&str> {
        self.calendar_id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Cache duration clamped to the supported range
    pub fn clamped_cache_duration(&self) -> u64 {
        clamp_cache_duration(self.cache_duration_secs)
    }
}

/// Clamp a cache duration to `[0, MAX_CACHE_DURATION_SECS]`
pub fn clamp_cache_duration(secs: u64) -> u64 {
    secs.min(MAX_CACHE_DURATION_SECS)
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_cache_duration() -> u64 {
    DEFAULT_CACHE_DURATION_SECS
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}
