//! Macro for implementing Display and FromStr for keyword enums
//!
//! Query parameters such as the display period arrive as loose strings from
//! the embedding page. This macro gives those enums one canonical lowercase
//! spelling and case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use calembed_domain::impl_keyword_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Layout {
//!     List,
//!     Grid,
//! }
//!
//! impl_keyword_conversions!(Layout {
//!     List => "list",
//!     Grid => "grid",
//! });
//!
//! assert_eq!("GRID".parse::<Layout>().unwrap(), Layout::Grid);
//! ```

/// Implements Display and FromStr for keyword enums
///
/// * Display writes the lowercase keyword
/// * FromStr accepts any casing and reports the enum name on failure
#[macro_export]
macro_rules! impl_keyword_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
