//! Category color sanitizing.

use crate::constants::DEFAULT_CATEGORY_COLOR;

/// Normalize a user-supplied color to `#rgb` / `#rrggbb` (lowercase).
///
/// The leading `#` is optional on input. Anything else falls back to
/// [`DEFAULT_CATEGORY_COLOR`].
pub fn sanitize_hex_color(input: &str) -> String {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    let well_formed =
        matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());

    if well_formed {
        format!("#{}", digits.to_ascii_lowercase())
    } else {
        DEFAULT_CATEGORY_COLOR.to_string()
    }
}
