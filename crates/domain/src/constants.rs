//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Cache configuration
pub const MAX_CACHE_DURATION_SECS: u64 = 3600;
pub const DEFAULT_CACHE_DURATION_SECS: u64 = 300;
pub const CACHE_KEY_PREFIX: &str = "calembed_events_";

// Upstream fetch
pub const DEFAULT_MAX_RESULTS: u32 = 250;
pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const UNTITLED_EVENT: &str = "Untitled Event";
pub const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

// Category registry
pub const DEFAULT_CATEGORY_COLOR: &str = "#4285f4";
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 3] = [
    ("COMMUNITY", "Community", "#34a853"),
    ("WORKSHOP", "Workshop", "#fbbc05"),
    ("TRAINING", "Training", "#ea4335"),
];

// Config store option names
pub const OPTION_CATEGORIES: &str = "calembed_categories";
pub const OPTION_CATEGORIES_SEEDED: &str = "calembed_categories_seeded";
pub const OPTION_CACHE_DURATION: &str = "calembed_cache_duration";
