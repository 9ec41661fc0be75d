//! Feed caching: key model, duration policy and store access

pub mod feed_cache;
pub mod key;
pub mod ports;
pub mod settings;

pub use feed_cache::FeedCache;
pub use key::{hash_fingerprint, CacheKeyModel};
pub use ports::EventCacheStore;
pub use settings::{CacheDuration, CacheSettings};
