//! # calembed Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The moka-backed feed cache
//! - In-memory and JSON-file settings stores
//! - Configuration loading from environment and files
//! - Tracing setup and cache metrics
//!
//! ## Architecture
//! - Implements traits defined in `calembed-core`
//! - Depends on `calembed-domain` and `calembed-core`
//! - Contains all "impure" code (I/O, process-wide subscribers)

pub mod cache;
pub mod config;
pub mod errors;
pub mod observability;
pub mod privilege;
pub mod settings;

// Re-export commonly used items
pub use cache::{MokaCacheConfig, MokaEventCache};
pub use errors::InfraError;
pub use observability::{init_tracing, CacheMetrics, CacheStats};
pub use privilege::StaticPrivilege;
pub use settings::{FileConfigStore, MemoryConfigStore};
