//! The rich document model.
//!
//! A document is a flat sequence of blocks; inline content is a run of
//! text spans carrying mark flags. Consecutive list items of the same
//! kind group into one `<ul>`/`<ol>` element at the HTML boundary (see
//! `html`), which is where the list-shape invariants are enforced.
//!
//! All offsets are character offsets, not byte offsets.

use std::ops::Range;

use crate::types::{BlockKind, Marks, Position, Selection};

/// An inline run of text with uniform marks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub marks: Marks,
}

impl TextSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Marks::empty(),
        }
    }

    pub fn marked(text: impl Into<String>, marks: Marks) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }
}

/// Byte index of the `char_idx`-th character (or the end of the string).
fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// One block node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub spans: Vec<TextSpan>,
}

impl Block {
    /// An explicitly empty block.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            spans: Vec::new(),
        }
    }

    /// A block holding one unmarked run.
    pub fn text_block(kind: BlockKind, text: impl Into<String>) -> Self {
        let text = text.into();
        let spans = if text.is_empty() {
            Vec::new()
        } else {
            vec![TextSpan::plain(text)]
        };
        Self { kind, spans }
    }

    /// A block from spans, coalescing adjacent runs with equal marks.
    pub fn from_spans(kind: BlockKind, spans: Vec<TextSpan>) -> Self {
        let mut block = Self::new(kind);
        for span in spans {
            block.push_merged(span);
        }
        block
    }

    pub fn len_chars(&self) -> usize {
        self.spans.iter().map(TextSpan::len_chars).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.is_empty())
    }

    /// The block's text with marks discarded.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            out.push_str(&span.text);
        }
        out
    }

    /// Append a span, merging into the previous run when marks match.
    pub(crate) fn push_merged(&mut self, span: TextSpan) {
        if span.text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.marks == span.marks => last.text.push_str(&span.text),
            _ => self.spans.push(span),
        }
    }

    /// Append text with the given marks.
    pub fn append_text(&mut self, text: &str, marks: Marks) {
        let marks = if self.kind == BlockKind::CodeBlock {
            Marks::empty()
        } else {
            marks
        };
        self.push_merged(TextSpan::marked(text, marks));
    }

    /// Split at `offset`; the block keeps the prefix and the suffix spans
    /// are returned.
    pub fn split_off(&mut self, offset: usize) -> Vec<TextSpan> {
        let spans = std::mem::take(&mut self.spans);
        let mut head = Vec::new();
        let mut tail = Vec::new();
        let mut pos = 0;
        for span in spans {
            let len = span.len_chars();
            if pos + len <= offset {
                head.push(span);
            } else if pos >= offset {
                tail.push(span);
            } else {
                let cut = byte_index(&span.text, offset - pos);
                head.push(TextSpan::marked(&span.text[..cut], span.marks));
                tail.push(TextSpan::marked(&span.text[cut..], span.marks));
            }
            pos += len;
        }
        self.spans = head;
        tail
    }

    /// Insert text at a character offset.
    pub fn insert_text(&mut self, offset: usize, text: &str, marks: Marks) {
        if text.is_empty() {
            return;
        }
        let marks = if self.kind == BlockKind::CodeBlock {
            Marks::empty()
        } else {
            marks
        };
        let tail = self.split_off(offset);
        self.push_merged(TextSpan::marked(text, marks));
        for span in tail {
            self.push_merged(span);
        }
    }

    /// Delete a character range.
    pub fn delete_range(&mut self, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        let tail = self.split_off(range.end);
        let _removed = self.split_off(range.start);
        for span in tail {
            self.push_merged(span);
        }
    }

    /// Set or clear a mark across a character range.
    pub fn apply_marks(&mut self, range: Range<usize>, flag: Marks, on: bool) {
        if range.start >= range.end || self.kind == BlockKind::CodeBlock {
            return;
        }
        let spans = std::mem::take(&mut self.spans);
        let mut pos = 0;
        for span in spans {
            let len = span.len_chars();
            let (start, end) = (pos, pos + len);
            pos = end;
            if end <= range.start || start >= range.end {
                self.push_merged(span);
                continue;
            }
            let cut_start = range.start.max(start) - start;
            let cut_end = range.end.min(end) - start;
            let b0 = byte_index(&span.text, cut_start);
            let b1 = byte_index(&span.text, cut_end);
            if cut_start > 0 {
                self.push_merged(TextSpan::marked(&span.text[..b0], span.marks));
            }
            let mut marks = span.marks;
            marks.set(flag, on);
            self.push_merged(TextSpan::marked(&span.text[b0..b1], marks));
            if cut_end < len {
                self.push_merged(TextSpan::marked(&span.text[b1..], span.marks));
            }
        }
    }

    /// Intersection of marks over the characters in `range`, or `None`
    /// if the range covers no characters.
    pub fn marks_over(&self, range: Range<usize>) -> Option<Marks> {
        if range.start >= range.end {
            return None;
        }
        let mut acc = Marks::all();
        let mut any = false;
        let mut pos = 0;
        for span in &self.spans {
            let len = span.len_chars();
            let (start, end) = (pos, pos + len);
            pos = end;
            if end <= range.start || start >= range.end {
                continue;
            }
            acc &= span.marks;
            any = true;
        }
        any.then_some(acc)
    }

    /// Marks a caret at `offset` would continue typing with (the marks of
    /// the character before the caret).
    pub fn marks_at(&self, offset: usize) -> Marks {
        if self.kind == BlockKind::CodeBlock {
            return Marks::empty();
        }
        let probe = offset.saturating_sub(1);
        let mut pos = 0;
        for span in &self.spans {
            let len = span.len_chars();
            if probe < pos + len {
                return span.marks;
            }
            pos += len;
        }
        self.spans.last().map(|s| s.marks).unwrap_or_default()
    }

    /// Change the structural kind. Entering or leaving a code block
    /// flattens inline marks, since code blocks hold plain text.
    pub fn set_kind(&mut self, kind: BlockKind) {
        if self.kind == kind {
            return;
        }
        if self.kind == BlockKind::CodeBlock || kind == BlockKind::CodeBlock {
            let text = self.text();
            self.spans = if text.is_empty() {
                Vec::new()
            } else {
                vec![TextSpan::plain(text)]
            };
        }
        self.kind = kind;
    }
}

/// The editing-time source of truth for post content.
///
/// Always holds at least one block; the canonical empty document is a
/// single empty paragraph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RichDocument {
    pub blocks: Vec<Block>,
}

impl Default for RichDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl RichDocument {
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::new(BlockKind::Paragraph)],
        }
    }

    /// Build from blocks; an empty list degrades to the empty document.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            Self::new()
        } else {
            Self { blocks }
        }
    }

    /// Whether this is the canonical empty document.
    pub fn is_empty(&self) -> bool {
        self.blocks.len() == 1
            && self.blocks[0].kind == BlockKind::Paragraph
            && self.blocks[0].is_empty()
    }

    pub fn end_position(&self) -> Position {
        let block = self.blocks.len() - 1;
        Position::new(block, self.blocks[block].len_chars())
    }

    /// Clamp a position into the document.
    pub fn clamp(&self, pos: Position) -> Position {
        let block = pos.block.min(self.blocks.len() - 1);
        Position::new(block, pos.offset.min(self.blocks[block].len_chars()))
    }

    pub fn clamp_selection(&self, sel: Selection) -> Selection {
        Selection::new(self.clamp(sel.anchor), self.clamp(sel.head))
    }

    /// Set or clear a mark across every block the selection spans.
    pub fn apply_marks(&mut self, sel: Selection, flag: Marks, on: bool) {
        let start = self.clamp(sel.start());
        let end = self.clamp(sel.end());
        for index in start.block..=end.block {
            let len = self.blocks[index].len_chars();
            let from = if index == start.block { start.offset } else { 0 };
            let to = if index == end.block { end.offset } else { len };
            self.blocks[index].apply_marks(from..to, flag, on);
        }
    }

    /// Intersection of marks over every character the selection covers.
    /// An empty cover yields no marks.
    pub fn marks_over(&self, sel: Selection) -> Marks {
        let start = self.clamp(sel.start());
        let end = self.clamp(sel.end());
        let mut acc: Option<Marks> = None;
        for index in start.block..=end.block {
            let len = self.blocks[index].len_chars();
            let from = if index == start.block { start.offset } else { 0 };
            let to = if index == end.block { end.offset } else { len };
            if let Some(marks) = self.blocks[index].marks_over(from..to) {
                acc = Some(acc.map_or(marks, |a| a & marks));
            }
        }
        acc.unwrap_or_default()
    }

    /// Delete the selected range, merging the boundary blocks. Returns
    /// the resulting caret position.
    pub fn delete_selection(&mut self, sel: Selection) -> Position {
        let start = self.clamp(sel.start());
        let end = self.clamp(sel.end());
        if start == end {
            return start;
        }
        if start.block == end.block {
            self.blocks[start.block].delete_range(start.offset..end.offset);
            return start;
        }
        let tail = self.blocks[end.block].split_off(end.offset);
        let _dropped = self.blocks[start.block].split_off(start.offset);
        for span in tail {
            self.blocks[start.block].push_merged(span);
        }
        self.blocks.drain(start.block + 1..=end.block);
        start
    }

    /// Insert text at a position.
    pub fn insert_text(&mut self, at: Position, text: &str, marks: Marks) {
        let at = self.clamp(at);
        self.blocks[at.block].insert_text(at.offset, text, marks);
    }

    /// Split a block in two at the given position. Splitting a heading
    /// yields a paragraph continuation; other kinds continue as
    /// themselves.
    pub fn split_block(&mut self, at: Position) -> Position {
        let at = self.clamp(at);
        let block = &mut self.blocks[at.block];
        let tail = block.split_off(at.offset);
        let kind = match block.kind {
            BlockKind::Heading(_) => BlockKind::Paragraph,
            kind => kind,
        };
        self.blocks
            .insert(at.block + 1, Block::from_spans(kind, tail));
        Position::new(at.block + 1, 0)
    }
}
