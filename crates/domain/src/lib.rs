//! # calembed Domain
//!
//! Business domain types for the tagged calendar embed.
//!
//! This crate contains:
//! - Event, category and query data types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - The inline tag marker grammar and color sanitizing
//!
//! ## Architecture
//! - No dependencies on other calembed crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::tag_grammar::{
    find_tag_tokens, is_valid_tag_format, normalize_tag_filter, strip_tags,
};
