//! Allow-list HTML sanitization.

use crate::policy;

/// Clean an untrusted HTML fragment down to the allow-list.
///
/// Input may come from the editor's own serializer, from markdown
/// conversion, or from persisted storage; it is always treated as
/// untrusted. Disallowed tags are stripped with their text content
/// preserved (`<script>`/`<style>` bodies are dropped entirely),
/// disallowed attributes are removed, and `javascript:`-scheme links
/// never survive.
///
/// Deterministic and total: the same input always yields byte-identical
/// output, unparseable input degrades to whatever the parser recovers
/// (worst case an empty string), and no input raises an error.
pub fn sanitize(raw: &str) -> String {
    let cleaned = policy::cleaner().clean(raw).to_string();
    tracing::trace!(in_len = raw.len(), out_len = cleaned.len(), "sanitized fragment");
    cleaned
}
