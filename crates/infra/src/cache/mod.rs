//! Feed cache adapters

pub mod moka_store;

pub use moka_store::{MokaCacheConfig, MokaEventCache, DEFAULT_FEED_CACHE_MAX_CAPACITY};
