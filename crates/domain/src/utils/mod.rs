//! Pure text helpers shared by the core services

pub mod color;
pub mod tag_grammar;

pub use color::sanitize_hex_color;
pub use tag_grammar::{
    find_tag_tokens, has_tag_marker, is_valid_tag_format, normalize_tag_filter, strip_tags,
};
