//! Observability: tracing setup and feed cache metrics

pub mod logging;
pub mod metrics;

pub use logging::{init_tracing, DEFAULT_FILTER};
pub use metrics::{CacheMetrics, CacheStats};
