//! Markdown ingestion.
//!
//! Converts externally-authored markdown into the editor's document
//! model by folding the parser's event stream. Conversion is
//! all-or-nothing: an unrepresentable construct fails the whole import
//! and nothing observable is built, so a failed import can never leave a
//! partially-overwritten document behind.

use pulldown_cmark::{Event, HeadingLevel as MdHeading, Options, Parser, Tag, TagEnd};

use crate::document::{Block, RichDocument};
use crate::error::ConversionError;
use crate::types::{BlockKind, HeadingLevel, ListKind, Marks};

/// Convert markdown text into a [`RichDocument`].
///
/// Supported: headings (clamped to the dialect's three levels),
/// emphasis, bullet/ordered lists (nested items hoisted into the
/// enclosing run), code fences, hard/soft breaks. Links and inline code
/// flatten to their text; thematic breaks are dropped. Raw HTML -
/// block or inline - is the unrecoverable case.
pub fn import_markdown(source: &str) -> Result<RichDocument, ConversionError> {
    let mut builder = DocBuilder::default();
    for event in Parser::new_ext(source, Options::empty()) {
        builder.event(event)?;
    }
    let doc = builder.finish();
    tracing::debug!(blocks = doc.blocks.len(), "markdown imported");
    Ok(doc)
}

#[derive(Default)]
struct DocBuilder {
    blocks: Vec<Block>,
    current: Option<Block>,
    /// Mark context stack; one entry per open inline container.
    marks: Vec<Marks>,
    /// Open list kinds, innermost last.
    lists: Vec<ListKind>,
    item_depth: usize,
    /// Depth of open image tags; their alt text is dropped.
    suppress: usize,
}

impl DocBuilder {
    fn event(&mut self, event: Event<'_>) -> Result<(), ConversionError> {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(end) => self.end(end),
            Event::Text(text) => {
                self.text(&text);
                Ok(())
            }
            Event::Code(text) => {
                // Inline code flattens to text in the editor dialect.
                self.text(&text);
                Ok(())
            }
            Event::SoftBreak => {
                self.text(" ");
                Ok(())
            }
            Event::HardBreak => {
                self.text("\n");
                Ok(())
            }
            // No model node; dropped.
            Event::Rule => Ok(()),
            Event::Html(html) | Event::InlineHtml(html) => Err(ConversionError::RawHtml {
                fragment: html.trim().to_string(),
            }),
            // Extensions are disabled; anything else carries no content.
            _ => Ok(()),
        }
    }

    fn start(&mut self, tag: Tag<'_>) -> Result<(), ConversionError> {
        match tag {
            Tag::Paragraph => {
                if self.in_list_item() {
                    // Loose-list paragraph content flows into the item.
                    if let Some(item) = &mut self.current {
                        if !item.is_empty() {
                            item.append_text("\n", Marks::empty());
                        }
                    }
                } else {
                    self.open(BlockKind::Paragraph);
                }
            }
            Tag::Heading { level, .. } => {
                let level = match level {
                    MdHeading::H1 => HeadingLevel::H1,
                    MdHeading::H2 => HeadingLevel::H2,
                    _ => HeadingLevel::H3,
                };
                self.open(BlockKind::Heading(level));
            }
            // Block quote content flattens to its constituent blocks.
            Tag::BlockQuote(_) => {}
            Tag::CodeBlock(_) => self.open(BlockKind::CodeBlock),
            Tag::List(start) => {
                let kind = if start.is_some() {
                    ListKind::Ordered
                } else {
                    ListKind::Bullet
                };
                self.lists.push(kind);
            }
            Tag::Item => {
                let kind = self.lists.last().copied().unwrap_or(ListKind::Bullet);
                self.open(BlockKind::ListItem(kind));
                self.item_depth += 1;
            }
            Tag::Emphasis => self.push_marks(Marks::ITALIC),
            Tag::Strong => self.push_marks(Marks::BOLD),
            // Links flatten to their text; the dialect has no link node.
            Tag::Link { .. } => self.marks.push(self.current_marks()),
            Tag::Image { .. } => {
                self.marks.push(self.current_marks());
                self.suppress += 1;
            }
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, end: TagEnd) -> Result<(), ConversionError> {
        match end {
            TagEnd::Paragraph => {
                if !self.in_list_item() {
                    self.close();
                }
            }
            TagEnd::Heading(_) => self.close(),
            TagEnd::CodeBlock => {
                // Fenced content carries a trailing newline; drop it.
                if let Some(block) = &mut self.current {
                    if let Some(span) = block.spans.last_mut() {
                        if span.text.ends_with('\n') {
                            span.text.pop();
                        }
                    }
                }
                self.close();
            }
            TagEnd::List(_) => {
                self.lists.pop();
            }
            TagEnd::Item => {
                self.item_depth = self.item_depth.saturating_sub(1);
                self.close();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Link => {
                self.marks.pop();
            }
            TagEnd::Image => {
                self.marks.pop();
                self.suppress = self.suppress.saturating_sub(1);
            }
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.suppress > 0 {
            return;
        }
        let marks = self.current_marks();
        self.current
            .get_or_insert_with(|| Block::new(BlockKind::Paragraph))
            .append_text(text, marks);
    }

    fn in_list_item(&self) -> bool {
        self.item_depth > 0
            && matches!(
                self.current,
                Some(Block {
                    kind: BlockKind::ListItem(_),
                    ..
                })
            )
    }

    fn current_marks(&self) -> Marks {
        self.marks.last().copied().unwrap_or_default()
    }

    fn push_marks(&mut self, flag: Marks) {
        self.marks.push(self.current_marks() | flag);
    }

    fn open(&mut self, kind: BlockKind) {
        self.close();
        self.current = Some(Block::new(kind));
    }

    fn close(&mut self) {
        if let Some(block) = self.current.take() {
            self.blocks.push(block);
        }
    }

    fn finish(mut self) -> RichDocument {
        self.close();
        RichDocument::from_blocks(self.blocks)
    }
}
