//! The rich document editing surface.
//!
//! A single editing state holding `{document, selection, pending marks,
//! history}`. Commands apply within the current selection; each mutating
//! command is one history step. Undo/redo move over the history without
//! branching and report availability instead of failing.

use crate::document::RichDocument;
use crate::history::History;
use crate::html;
use crate::types::{BlockKind, Mark, Marks, Position, Selection};

/// Toolbar-level commands, dispatched to the editing surface.
///
/// `SetHeading`/`ToggleBulletList`/`ToggleOrderedList`/`ToggleCodeBlock`
/// share toggle semantics: re-applying the active kind reverts the
/// block(s) to paragraphs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorCommand {
    ToggleBold,
    ToggleItalic,
    SetHeading(crate::types::HeadingLevel),
    SetParagraph,
    ToggleBulletList,
    ToggleOrderedList,
    ToggleCodeBlock,
    InsertText(String),
    InsertBreak,
    SplitBlock,
    DeleteSelection,
    Undo,
    Redo,
}

/// The editing surface.
pub struct Editor {
    document: RichDocument,
    selection: Selection,
    /// Mark state for the next insertion when the selection is collapsed.
    pending_marks: Option<Marks>,
    history: History,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// An editor over the canonical empty document.
    pub fn new() -> Self {
        Self::with_document(RichDocument::new())
    }

    pub fn with_document(document: RichDocument) -> Self {
        Self {
            document,
            selection: Selection::default(),
            pending_marks: None,
            history: History::default(),
        }
    }

    pub fn document(&self) -> &RichDocument {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Move the selection. Clamped into the document; clears the pending
    /// next-typed mark state.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = self.document.clamp_selection(selection);
        self.pending_marks = None;
    }

    /// Serialize to the sanitizer-compatible HTML dialect.
    pub fn serialize(&self) -> String {
        html::serialize(&self.document)
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    fn checkpoint(&mut self) {
        self.history.record(self.document.clone(), self.selection);
    }

    /// Replace the whole document. This is the explicit destructive step
    /// after a markdown import (or when seeding from a stored post); it
    /// discards the prior document but records it in history, so it can
    /// still be undone.
    pub fn load_document(&mut self, document: RichDocument) {
        self.checkpoint();
        self.document = document;
        self.selection = Selection::collapsed(Position::START);
        self.pending_marks = None;
        tracing::debug!(blocks = self.document.blocks.len(), "document replaced");
    }

    // === Mark commands ===

    /// Toggle an inline mark over the selection.
    ///
    /// Strict toggle: a mark active on the full selection is removed;
    /// otherwise it is applied to the whole selection. A collapsed
    /// selection flips the "next typed" state instead.
    pub fn toggle_mark(&mut self, mark: Mark) -> bool {
        if self.selection.is_collapsed() {
            let base = self
                .pending_marks
                .unwrap_or_else(|| self.marks_at_caret());
            self.pending_marks = Some(base ^ mark.as_flag());
            return true;
        }
        let active = self.is_mark_active(mark);
        self.checkpoint();
        self.document
            .apply_marks(self.selection, mark.as_flag(), !active);
        true
    }

    /// Marks the caret would continue typing with.
    fn marks_at_caret(&self) -> Marks {
        let caret = self.document.clamp(self.selection.head);
        self.document.blocks[caret.block].marks_at(caret.offset)
    }

    /// The set of marks active across the current selection; drives the
    /// toolbar highlight state.
    pub fn active_marks(&self) -> Marks {
        if self.selection.is_collapsed() {
            self.pending_marks.unwrap_or_else(|| self.marks_at_caret())
        } else {
            self.document.marks_over(self.selection)
        }
    }

    pub fn is_mark_active(&self, mark: Mark) -> bool {
        self.active_marks().contains(mark.as_flag())
    }

    // === Block commands ===

    fn selected_block_range(&self) -> std::ops::RangeInclusive<usize> {
        let start = self.document.clamp(self.selection.start());
        let end = self.document.clamp(self.selection.end());
        start.block..=end.block
    }

    /// Whether every block the selection touches has the given kind.
    pub fn is_block_active(&self, kind: BlockKind) -> bool {
        self.selected_block_range()
            .all(|index| self.document.blocks[index].kind == kind)
    }

    /// Set the block type across the selection, with toggle semantics:
    /// if every selected block already has the kind, revert to
    /// paragraphs.
    pub fn set_block_type(&mut self, kind: BlockKind) -> bool {
        let target = if self.is_block_active(kind) {
            BlockKind::Paragraph
        } else {
            kind
        };
        self.checkpoint();
        for index in self.selected_block_range() {
            self.document.blocks[index].set_kind(target);
        }
        // Offsets are unchanged by a kind change except into/out of code
        // blocks, where mark flattening cannot move characters either.
        true
    }

    // === Content commands ===

    /// Insert text at the selection, replacing any selected range. The
    /// pending next-typed marks are consumed here.
    pub fn insert_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.checkpoint();
        let caret = self.document.delete_selection(self.selection);
        let marks = self.pending_marks.take().unwrap_or_else(|| {
            self.document.blocks[caret.block].marks_at(caret.offset)
        });
        self.document.insert_text(caret, text, marks);
        let caret = Position::new(caret.block, caret.offset + text.chars().count());
        self.selection = Selection::collapsed(self.document.clamp(caret));
        true
    }

    /// Insert an in-block line break (serialized as `<br>`).
    pub fn insert_break(&mut self) -> bool {
        self.insert_text("\n")
    }

    /// Split the current block at the caret (Enter). A heading continues
    /// as a paragraph; splitting an empty list item leaves the list
    /// instead.
    pub fn split_block(&mut self) -> bool {
        self.checkpoint();
        let caret = self.document.delete_selection(self.selection);
        let block = &mut self.document.blocks[caret.block];
        if matches!(block.kind, BlockKind::ListItem(_)) && block.is_empty() {
            block.set_kind(BlockKind::Paragraph);
            self.selection = Selection::collapsed(Position::new(caret.block, 0));
            return true;
        }
        let caret = self.document.split_block(caret);
        self.selection = Selection::collapsed(caret);
        self.pending_marks = None;
        true
    }

    /// Delete the selected range. Reports `false` for a collapsed
    /// selection (nothing to delete).
    pub fn delete_selection(&mut self) -> bool {
        if self.selection.is_collapsed() {
            return false;
        }
        self.checkpoint();
        let caret = self.document.delete_selection(self.selection);
        self.selection = Selection::collapsed(caret);
        true
    }

    // === History ===

    /// Step back one edit. Reports availability rather than failing.
    pub fn undo(&mut self) -> bool {
        match self
            .history
            .undo(self.document.clone(), self.selection)
        {
            Some((document, selection)) => {
                self.document = document;
                self.selection = selection;
                self.pending_marks = None;
                true
            }
            None => false,
        }
    }

    /// Step forward one undone edit.
    pub fn redo(&mut self) -> bool {
        match self
            .history
            .redo(self.document.clone(), self.selection)
        {
            Some((document, selection)) => {
                self.document = document;
                self.selection = selection;
                self.pending_marks = None;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Dispatch a toolbar command. Returns whether the editor handled it.
    pub fn execute(&mut self, command: &EditorCommand) -> bool {
        match command {
            EditorCommand::ToggleBold => self.toggle_mark(Mark::Bold),
            EditorCommand::ToggleItalic => self.toggle_mark(Mark::Italic),
            EditorCommand::SetHeading(level) => {
                self.set_block_type(BlockKind::Heading(*level))
            }
            EditorCommand::SetParagraph => self.set_block_type(BlockKind::Paragraph),
            EditorCommand::ToggleBulletList => {
                self.set_block_type(BlockKind::ListItem(crate::types::ListKind::Bullet))
            }
            EditorCommand::ToggleOrderedList => {
                self.set_block_type(BlockKind::ListItem(crate::types::ListKind::Ordered))
            }
            EditorCommand::ToggleCodeBlock => self.set_block_type(BlockKind::CodeBlock),
            EditorCommand::InsertText(text) => self.insert_text(text),
            EditorCommand::InsertBreak => self.insert_break(),
            EditorCommand::SplitBlock => self.split_block(),
            EditorCommand::DeleteSelection => self.delete_selection(),
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
        }
    }
}
