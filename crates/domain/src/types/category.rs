//! Category whitelist types
//!
//! A category id is the canonical uppercase form of a tag token. All
//! comparisons go through [`CategoryId`] so case folding happens exactly once,
//! at construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::errors::{CalEmbedError, Result};
use crate::utils::color::sanitize_hex_color;
use crate::utils::tag_grammar::is_valid_tag_format;

/// Canonical uppercase category identifier (`[A-Z0-9_-]+`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct CategoryId(String);

impl CategoryId {
    /// Parse and canonicalize an id.
    ///
    /// # Errors
    /// Returns [`CalEmbedError::InvalidFormat`] when the trimmed input is not
    /// a well-formed tag token.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if !is_valid_tag_format(trimmed) {
            return Err(CalEmbedError::InvalidFormat(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CategoryId {
    type Err = CalEmbedError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CategoryId {
    type Error = CalEmbedError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CategoryId> for String {
    fn from(value: CategoryId) -> Self {
        value.0
    }
}

impl AsRef<str> for CategoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whitelist entry managed by the category registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
pub struct CategoryEntry {
    pub id: CategoryId,
    pub display_name: String,
    pub color: String,
}

impl CategoryEntry {
    /// Build an entry with a sanitized color and a non-empty display name.
    pub fn new(id: CategoryId, display_name: &str, color: &str) -> Self {
        let display_name = match display_name.trim() {
            "" => id.as_str().to_string(),
            name => name.to_string(),
        };
        Self { id, display_name, color: sanitize_hex_color(color) }
    }
}
