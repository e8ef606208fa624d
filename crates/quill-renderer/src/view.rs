//! Sanitized render view.
//!
//! The single required choke-point for post content reaching the page.
//! Content is never trusted because it was previously sanitized or
//! previously stored; every render passes through the sanitizer again.

use crate::fragment::{SafeFragment, parse_fragment};
use crate::sanitize::sanitize;

/// Turn a stored post's raw `content` field into a safe renderable tree.
pub fn render_content(raw: &str) -> SafeFragment {
    parse_fragment(&sanitize(raw))
}

/// Plain-text excerpt of stored post content.
///
/// Strips all markup (through the sanitizer) and truncates to at most
/// `max_chars` characters with a trailing ellipsis. Used for post cards
/// and share snippets.
pub fn plain_excerpt(raw: &str, max_chars: usize) -> String {
    let text = render_content(raw).text();
    if text.chars().count() > max_chars {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::SafeNode;

    #[test]
    fn test_render_is_sanitized() {
        let fragment = render_content(r#"<p>ok</p><script>alert(1)</script>"#);
        assert_eq!(fragment.nodes.len(), 1);
        assert_eq!(fragment.nodes[0].tag(), Some("p"));
        assert!(!fragment.text().contains("alert"));
    }

    #[test]
    fn test_stored_img_onerror_never_renders() {
        let fragment = render_content(r#"<p>a</p><img src="x" onerror="alert(1)">"#);
        let tags: Vec<_> = fragment.nodes.iter().filter_map(SafeNode::tag).collect();
        assert_eq!(tags, vec!["p"]);
    }

    #[test]
    fn test_excerpt_strips_markup() {
        let excerpt = plain_excerpt("<h1>Title</h1><p>Body <strong>text</strong></p>", 150);
        assert_eq!(excerpt, "TitleBody text");
    }

    #[test]
    fn test_excerpt_truncates_with_ellipsis() {
        let long = format!("<p>{}</p>", "x".repeat(200));
        let excerpt = plain_excerpt(&long, 150);
        assert_eq!(excerpt.chars().count(), 153);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn test_excerpt_short_content_untouched() {
        assert_eq!(plain_excerpt("<p>short</p>", 150), "short");
    }
}
