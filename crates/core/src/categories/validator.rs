//! Tag validation against the category whitelist

use std::collections::BTreeSet;

use calembed_domain::{find_tag_tokens, CategoryId, TagExtraction};
use tracing::warn;

/// Splits tag markers into whitelisted and unknown ids
///
/// Holds a snapshot of the registry id set taken when the validator was
/// built. An empty snapshot rejects every token.
#[derive(Debug, Clone, Default)]
pub struct TagValidator {
    whitelist: BTreeSet<CategoryId>,
}

impl TagValidator {
    pub fn new<I>(whitelist: I) -> Self
    where
        I: IntoIterator<Item = CategoryId>,
    {
        Self { whitelist: whitelist.into_iter().collect() }
    }

    pub fn whitelist(&self) -> &BTreeSet<CategoryId> {
        &self.whitelist
    }

    /// Classify every marker in `text`
    ///
    /// Unknown tokens are logged and returned in `invalid`; they never fail
    /// the call.
    pub fn extract_tags(&self, text: &str) -> TagExtraction {
        let mut extraction = TagExtraction::default();

        for token in find_tag_tokens(text) {
            let Ok(id) = CategoryId::parse(&token) else {
                continue;
            };
            if self.whitelist.contains(&id) {
                extraction.valid.insert(id);
            } else {
                warn!(tag = %id, "unknown category tag in event description");
                extraction.invalid.insert(id);
            }
        }

        extraction
    }
}
