//! Safe fragment tree.
//!
//! Parses already-sanitized HTML (the output dialect of
//! [`sanitize`](crate::sanitize)) into a tree the host UI can walk
//! without ever touching raw markup again. The parser only has to
//! understand the allow-listed vocabulary; anything unexpected degrades
//! to text, never to an error.

use smol_str::SmolStr;

/// One node of a sanitized fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SafeNode {
    Element {
        tag: SmolStr,
        attrs: Vec<(SmolStr, String)>,
        children: Vec<SafeNode>,
    },
    Text(String),
}

impl SafeNode {
    /// Element tag name, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match self {
            SafeNode::Element { tag, .. } => Some(tag.as_str()),
            SafeNode::Text(_) => None,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            SafeNode::Text(text) => out.push_str(text),
            SafeNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// A parsed, sanitized HTML fragment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SafeFragment {
    pub nodes: Vec<SafeNode>,
}

impl SafeFragment {
    /// All text content, markup discarded.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.collect_text(&mut out);
        }
        out
    }
}

/// Tags that never take a closing tag in the sanitized dialect.
const VOID_TAGS: &[&str] = &["br"];

struct OpenElement {
    tag: SmolStr,
    attrs: Vec<(SmolStr, String)>,
    children: Vec<SafeNode>,
}

/// Parse a sanitized HTML fragment into a tree.
///
/// Input is expected to be the sanitizer's output; stray or unbalanced
/// markup is tolerated (dangling opens are auto-closed, unmatched closes
/// ignored) so this never fails.
pub(crate) fn parse_fragment(html: &str) -> SafeFragment {
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut top: Vec<SafeNode> = Vec::new();
    let mut rest = html;

    while !rest.is_empty() {
        match rest.find('<') {
            Some(lt) => {
                if lt > 0 {
                    push_text(&mut stack, &mut top, &rest[..lt]);
                }
                rest = &rest[lt..];
                match find_tag_end(rest) {
                    Some(gt) => {
                        apply_tag(&rest[1..gt], &mut stack, &mut top);
                        rest = &rest[gt + 1..];
                    }
                    None => {
                        // Dangling '<' without a closing '>'; keep as text.
                        push_text(&mut stack, &mut top, rest);
                        rest = "";
                    }
                }
            }
            None => {
                push_text(&mut stack, &mut top, rest);
                rest = "";
            }
        }
    }

    // Auto-close anything left open.
    while let Some(open) = stack.pop() {
        attach(&mut stack, &mut top, close_element(open));
    }

    SafeFragment { nodes: top }
}

/// Index of the '>' ending the tag starting at `src[0] == '<'`, skipping
/// over double-quoted attribute values.
fn find_tag_end(src: &str) -> Option<usize> {
    let mut in_quote = false;
    for (i, ch) in src.char_indices() {
        match ch {
            '"' => in_quote = !in_quote,
            '>' if !in_quote => return Some(i),
            _ => {}
        }
    }
    None
}

fn close_element(open: OpenElement) -> SafeNode {
    SafeNode::Element {
        tag: open.tag,
        attrs: open.attrs,
        children: open.children,
    }
}

fn attach(stack: &mut Vec<OpenElement>, top: &mut Vec<SafeNode>, node: SafeNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top.push(node),
    }
}

fn push_text(stack: &mut Vec<OpenElement>, top: &mut Vec<SafeNode>, raw: &str) {
    let text = decode_entities(raw);
    let children = match stack.last_mut() {
        Some(parent) => &mut parent.children,
        None => top,
    };
    // Coalesce with a preceding text node.
    if let Some(SafeNode::Text(prev)) = children.last_mut() {
        prev.push_str(&text);
    } else {
        children.push(SafeNode::Text(text));
    }
}

fn apply_tag(src: &str, stack: &mut Vec<OpenElement>, top: &mut Vec<SafeNode>) {
    let src = src.trim();
    if src.is_empty() || src.starts_with('!') {
        return;
    }

    if let Some(name) = src.strip_prefix('/') {
        let name = name.trim();
        if !stack.iter().any(|open| open.tag == name) {
            return; // unmatched close
        }
        while let Some(open) = stack.pop() {
            let done = open.tag == name;
            attach(stack, top, close_element(open));
            if done {
                break;
            }
        }
        return;
    }

    let (tag, attrs, self_closing) = parse_tag_body(src);
    if tag.is_empty() {
        return;
    }
    if self_closing || VOID_TAGS.contains(&tag.as_str()) {
        attach(
            stack,
            top,
            SafeNode::Element {
                tag,
                attrs,
                children: Vec::new(),
            },
        );
    } else {
        stack.push(OpenElement {
            tag,
            attrs,
            children: Vec::new(),
        });
    }
}

/// Split `p class="x" ...` into name, attributes, and self-closing flag.
fn parse_tag_body(src: &str) -> (SmolStr, Vec<(SmolStr, String)>, bool) {
    let (src, self_closing) = match src.strip_suffix('/') {
        Some(stripped) => (stripped.trim_end(), true),
        None => (src, false),
    };

    let name_end = src
        .find(|c: char| c.is_whitespace())
        .unwrap_or(src.len());
    let name = SmolStr::new(src[..name_end].to_ascii_lowercase());
    let mut attrs = Vec::new();
    let mut rest = src[name_end..].trim_start();

    while !rest.is_empty() {
        let key_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let key = SmolStr::new(rest[..key_end].to_ascii_lowercase());
        rest = rest[key_end..].trim_start();
        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            if let Some(quoted) = after_eq.strip_prefix('"') {
                match quoted.find('"') {
                    Some(end) => {
                        attrs.push((key, decode_entities(&quoted[..end])));
                        rest = quoted[end + 1..].trim_start();
                    }
                    None => {
                        attrs.push((key, decode_entities(quoted)));
                        rest = "";
                    }
                }
            } else {
                // Unquoted value: read to the next whitespace.
                let end = after_eq
                    .find(|c: char| c.is_whitespace())
                    .unwrap_or(after_eq.len());
                attrs.push((key, decode_entities(&after_eq[..end])));
                rest = after_eq[end..].trim_start();
            }
        } else if !key.is_empty() {
            attrs.push((key, String::new()));
        } else {
            break;
        }
    }

    (name, attrs, self_closing)
}

/// Decode the entity vocabulary the sanitizer's serializer emits.
fn decode_entities(src: &str) -> String {
    if !src.contains('&') {
        return src.to_string();
    }
    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|semi| *semi <= 9)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|ch| (ch, semi)));
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let fragment = parse_fragment("<p>a<strong>b</strong>c</p>");
        assert_eq!(fragment.nodes.len(), 1);
        let SafeNode::Element { tag, children, .. } = &fragment.nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(tag, "p");
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], SafeNode::Text("a".into()));
        assert_eq!(children[1].tag(), Some("strong"));
        assert_eq!(children[2], SafeNode::Text("c".into()));
    }

    #[test]
    fn test_parse_attributes() {
        let fragment =
            parse_fragment(r#"<a href="https://example.com?a=1&amp;b=2" target="_blank">x</a>"#);
        let SafeNode::Element { attrs, .. } = &fragment.nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].0, "href");
        assert_eq!(attrs[0].1, "https://example.com?a=1&b=2");
        assert_eq!(attrs[1], ("target".into(), "_blank".into()));
    }

    #[test]
    fn test_br_is_void() {
        let fragment = parse_fragment("<p>a<br>b</p>");
        let SafeNode::Element { children, .. } = &fragment.nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(children.len(), 3);
        assert_eq!(children[1].tag(), Some("br"));
    }

    #[test]
    fn test_entities_decoded() {
        let fragment = parse_fragment("<p>fish &amp; chips &lt;3 &#39;quoted&#39;</p>");
        assert_eq!(fragment.text(), "fish & chips <3 'quoted'");
    }

    #[test]
    fn test_unbalanced_markup_tolerated() {
        let fragment = parse_fragment("<p>open</em> only");
        assert_eq!(fragment.text(), "open only");

        let fragment = parse_fragment("<ul><li>never closed");
        assert_eq!(fragment.text(), "never closed");
        assert_eq!(fragment.nodes[0].tag(), Some("ul"));
    }

    #[test]
    fn test_text_coalesced() {
        let fragment = parse_fragment("a&amp;b");
        assert_eq!(fragment.nodes, vec![SafeNode::Text("a&b".into())]);
    }
}
