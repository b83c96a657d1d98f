//! Tag helpers shared by the codecs.

use regex::Regex;

/// Wrap content in an HTML style tag.
///
/// ```rust
/// use strex_output::utils::wrap_in_tag;
///
/// assert_eq!(wrap_in_tag("table", "hello"), "<table>hello</table>");
/// ```
#[must_use]
pub fn wrap_in_tag(tag: &str, content: &str) -> String {
    format!("<{tag}>{content}</{tag}>")
}

/// Extract the content of the first `<tag>...</tag>` pair in `text`.
///
/// Matching is non-greedy and spans newlines. Returns `None` when the tag
/// is absent.
#[must_use]
pub fn unwrap_tag<'a>(tag: &str, text: &'a str) -> Option<&'a str> {
    let tag = regex::escape(tag);
    let pattern = Regex::new(&format!("(?s)<{tag}>(.*?)</{tag}>")).ok()?;
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}
