//! The fixed sanitization policy.
//!
//! Process-wide constant configuration; never mutated at runtime. The
//! allow-list deliberately omits images and media embeds.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use ammonia::Builder;

/// Element tags allowed to survive sanitization.
pub const ALLOWED_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "strong", "em", "u", "a", "ul",
    "ol", "li", "br", "code", "pre", "blockquote",
];

/// Attributes allowed on `<a>`. No other tag carries attributes.
pub const ALLOWED_ANCHOR_ATTRS: &[&str] = &["href", "target"];

/// URL schemes an `href` may use. `javascript:` is absent on purpose.
pub const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// The shared cleaner, built once from the constants above.
pub(crate) fn cleaner() -> &'static Builder<'static> {
    static CLEANER: OnceLock<Builder<'static>> = OnceLock::new();
    CLEANER.get_or_init(|| {
        let mut builder = Builder::default();
        builder
            .tags(HashSet::from_iter(ALLOWED_TAGS.iter().copied()))
            .tag_attributes(HashMap::from_iter([(
                "a",
                HashSet::from_iter(ALLOWED_ANCHOR_ATTRS.iter().copied()),
            )]))
            .generic_attributes(HashSet::new())
            .url_schemes(HashSet::from_iter(ALLOWED_URL_SCHEMES.iter().copied()))
            .link_rel(None);
        builder
    })
}
