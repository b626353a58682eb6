//! Plain-text helpers for preparing row values.

use std::sync::OnceLock;

use regex::Regex;

static TAG_RE: OnceLock<Regex> = OnceLock::new();

/// Removes markup tags from `text`.
///
/// Strips every `<...>` span with a fixed pattern. Not an HTML parser:
/// comments, CDATA, and `>` inside attribute values are not handled. Good
/// enough to clean stored markup before tokenizing or embedding it.
///
/// # Examples
///
/// ```
/// use promptql::text::strip_tags;
///
/// assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
/// ```
#[must_use]
pub fn strip_tags(text: &str) -> String {
    let re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));
    re.replace_all(text, "").into_owned()
}
