//! Settings store adapters
//!
//! Implementations of the core `ConfigStore` port: a process-local map and a
//! JSON document on disk.

pub mod file_store;
pub mod memory_store;

pub use file_store::FileConfigStore;
pub use memory_store::MemoryConfigStore;
