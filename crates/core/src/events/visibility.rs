//! Visibility policy
//!
//! | requested tags | event state       | privileged        | public                |
//! |----------------|-------------------|-------------------|-----------------------|
//! | none           | any               | shown             | only with a valid tag |
//! | some           | untagged          | shown             | hidden                |
//! | some           | unknown tags only | shown             | hidden                |
//! | some           | has valid tags    | if a tag matches  | if a tag matches      |

use calembed_domain::{normalize_tag_filter, ProcessedEvent};

/// Keep the events the viewer may see, preserving order
///
/// `requested_tags` are matched case-insensitively with OR semantics.
pub fn filter_by_tags<S: AsRef<str>>(
    events: Vec<ProcessedEvent>,
    requested_tags: &[S],
    viewer_is_privileged: bool,
) -> Vec<ProcessedEvent> {
    let requested = normalize_tag_filter(requested_tags);
    events
        .into_iter()
        .filter(|event| is_visible(event, &requested, viewer_is_privileged))
        .collect()
}

/// Policy for one event against an already normalized filter
pub fn is_visible(
    event: &ProcessedEvent,
    requested: &[String],
    viewer_is_privileged: bool,
) -> bool {
    if requested.is_empty() {
        return viewer_is_privileged || event.has_valid_tags();
    }

    if event.is_untagged() || event.has_unknown_tags_only() {
        return viewer_is_privileged;
    }

    event.valid_tags().iter().any(|tag| requested.iter().any(|wanted| wanted == tag.as_str()))
}
