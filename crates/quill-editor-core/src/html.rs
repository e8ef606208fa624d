//! HTML serialization of the editor dialect, and ingestion of stored
//! content back into the document model.
//!
//! `serialize` emits only tags the sanitizer allow-list accepts, so the
//! write path and the read path agree on the document vocabulary.
//! `document_from_html` routes stored content through the sanitizer
//! first, then folds the resulting tree into the editor dialect.

use pulldown_cmark_escape::escape_html;
use quill_renderer::{SafeNode, render_content};

use crate::document::{Block, RichDocument};
use crate::types::{BlockKind, HeadingLevel, ListKind, Marks};

/// Canonical serialization of the empty document.
pub const EMPTY_DOCUMENT_HTML: &str = "<p></p>";

/// Serialize a document to the sanitizer-compatible HTML dialect.
///
/// Consecutive list items of the same kind are grouped under a single
/// `<ul>`/`<ol>`, so list elements contain only `<li>` children.
pub fn serialize(doc: &RichDocument) -> String {
    let mut out = String::new();
    let mut index = 0;
    while index < doc.blocks.len() {
        let block = &doc.blocks[index];
        match block.kind {
            BlockKind::Paragraph => {
                out.push_str("<p>");
                write_spans(&mut out, block);
                out.push_str("</p>");
                index += 1;
            }
            BlockKind::Heading(level) => {
                let tag = heading_tag(level);
                out.push('<');
                out.push_str(tag);
                out.push('>');
                write_spans(&mut out, block);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                index += 1;
            }
            BlockKind::ListItem(kind) => {
                let tag = match kind {
                    ListKind::Bullet => "ul",
                    ListKind::Ordered => "ol",
                };
                out.push('<');
                out.push_str(tag);
                out.push('>');
                while index < doc.blocks.len()
                    && doc.blocks[index].kind == BlockKind::ListItem(kind)
                {
                    out.push_str("<li>");
                    write_spans(&mut out, &doc.blocks[index]);
                    out.push_str("</li>");
                    index += 1;
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            BlockKind::CodeBlock => {
                out.push_str("<pre><code>");
                let _ = escape_html(&mut out, &block.text());
                out.push_str("</code></pre>");
                index += 1;
            }
        }
    }
    out
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
    }
}

fn write_spans(out: &mut String, block: &Block) {
    for span in &block.spans {
        let bold = span.marks.contains(Marks::BOLD);
        let italic = span.marks.contains(Marks::ITALIC);
        if bold {
            out.push_str("<strong>");
        }
        if italic {
            out.push_str("<em>");
        }
        let mut first = true;
        for line in span.text.split('\n') {
            if !first {
                out.push_str("<br>");
            }
            first = false;
            let _ = escape_html(&mut *out, line);
        }
        if italic {
            out.push_str("</em>");
        }
        if bold {
            out.push_str("</strong>");
        }
    }
}

/// Build a document from a stored post's HTML `content`.
///
/// Stored content is untrusted, so it is sanitized before ingestion.
/// The allow-list is wider than the editor dialect; the extra vocabulary
/// degrades rather than errors: `h4`-`h6` clamp to `h3`, `blockquote`
/// flattens to paragraphs, and `u`/`a`/inline `code` flatten to their
/// text with surrounding marks kept.
pub fn document_from_html(content: &str) -> RichDocument {
    let fragment = render_content(content);
    let mut blocks = Vec::new();
    let mut pending = None;
    ingest_blocks(&fragment.nodes, &mut blocks, &mut pending);
    flush(&mut blocks, &mut pending);
    RichDocument::from_blocks(blocks)
}

fn flush(blocks: &mut Vec<Block>, pending: &mut Option<Block>) {
    if let Some(block) = pending.take() {
        blocks.push(block);
    }
}

fn ingest_blocks(nodes: &[SafeNode], blocks: &mut Vec<Block>, pending: &mut Option<Block>) {
    for node in nodes {
        match node {
            SafeNode::Text(text) => {
                if text.trim().is_empty() {
                    continue;
                }
                pending
                    .get_or_insert_with(|| Block::new(BlockKind::Paragraph))
                    .append_text(text, Marks::empty());
            }
            SafeNode::Element { tag, children, .. } => match tag.as_str() {
                "p" => {
                    flush(blocks, pending);
                    let mut block = Block::new(BlockKind::Paragraph);
                    ingest_inline(children, &mut block, Marks::empty());
                    blocks.push(block);
                }
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                    flush(blocks, pending);
                    let level = match tag.as_str() {
                        "h1" => HeadingLevel::H1,
                        "h2" => HeadingLevel::H2,
                        _ => HeadingLevel::H3,
                    };
                    let mut block = Block::new(BlockKind::Heading(level));
                    ingest_inline(children, &mut block, Marks::empty());
                    blocks.push(block);
                }
                "ul" => {
                    flush(blocks, pending);
                    ingest_list(ListKind::Bullet, children, blocks);
                }
                "ol" => {
                    flush(blocks, pending);
                    ingest_list(ListKind::Ordered, children, blocks);
                }
                "pre" => {
                    flush(blocks, pending);
                    let mut text = text_of(children);
                    if text.ends_with('\n') {
                        text.pop();
                    }
                    blocks.push(Block::text_block(BlockKind::CodeBlock, text));
                }
                "blockquote" => {
                    flush(blocks, pending);
                    let mut inner = None;
                    ingest_blocks(children, blocks, &mut inner);
                    flush(blocks, &mut inner);
                }
                "br" => {
                    pending
                        .get_or_insert_with(|| Block::new(BlockKind::Paragraph))
                        .append_text("\n", Marks::empty());
                }
                // Stray inline markup at the top level joins an implicit
                // paragraph.
                _ => {
                    let block =
                        pending.get_or_insert_with(|| Block::new(BlockKind::Paragraph));
                    ingest_inline(std::slice::from_ref(node), block, Marks::empty());
                }
            },
        }
    }
}

fn ingest_list(kind: ListKind, children: &[SafeNode], blocks: &mut Vec<Block>) {
    for child in children {
        let SafeNode::Element {
            tag,
            children: item_children,
            ..
        } = child
        else {
            continue;
        };
        if tag != "li" {
            continue;
        }
        let mut item = Block::new(BlockKind::ListItem(kind));
        let mut trailing = Vec::new();
        for node in item_children {
            match node {
                SafeNode::Element { tag, children, .. } if tag == "ul" => {
                    ingest_list(ListKind::Bullet, children, &mut trailing);
                }
                SafeNode::Element { tag, children, .. } if tag == "ol" => {
                    ingest_list(ListKind::Ordered, children, &mut trailing);
                }
                SafeNode::Element { tag, children, .. } if tag == "p" => {
                    if !item.is_empty() {
                        item.append_text("\n", Marks::empty());
                    }
                    ingest_inline(children, &mut item, Marks::empty());
                }
                inline => ingest_inline(std::slice::from_ref(inline), &mut item, Marks::empty()),
            }
        }
        blocks.push(item);
        blocks.append(&mut trailing);
    }
}

fn ingest_inline(nodes: &[SafeNode], block: &mut Block, marks: Marks) {
    for node in nodes {
        match node {
            SafeNode::Text(text) => block.append_text(text, marks),
            SafeNode::Element { tag, children, .. } => match tag.as_str() {
                "strong" => ingest_inline(children, block, marks | Marks::BOLD),
                "em" => ingest_inline(children, block, marks | Marks::ITALIC),
                "br" => block.append_text("\n", marks),
                // u, a, inline code, and anything unexpected flatten to
                // their text with the surrounding marks kept.
                _ => ingest_inline(children, block, marks),
            },
        }
    }
}

fn text_of(nodes: &[SafeNode]) -> String {
    let mut out = String::new();
    collect_text(nodes, &mut out);
    out
}

fn collect_text(nodes: &[SafeNode], out: &mut String) {
    for node in nodes {
        match node {
            SafeNode::Text(text) => out.push_str(text),
            SafeNode::Element { children, .. } => collect_text(children, out),
        }
    }
}
