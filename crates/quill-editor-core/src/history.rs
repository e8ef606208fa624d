//! Undo/redo history.
//!
//! A bounded pair of snapshot stacks over the whole document. Each
//! recorded step is one logical edit command, not one keystroke; redo is
//! invalidated by new edits and the oldest steps are evicted once the
//! bound is reached.

use crate::document::RichDocument;
use crate::types::Selection;

#[derive(Clone, Debug)]
struct Snapshot {
    document: RichDocument,
    selection: Selection,
}

#[derive(Clone, Debug)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_steps: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_STEPS)
    }
}

impl History {
    pub const DEFAULT_MAX_STEPS: usize = 100;

    pub fn new(max_steps: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_steps,
        }
    }

    /// Record the state as it was just before an edit.
    pub fn record(&mut self, document: RichDocument, selection: Selection) {
        // New edits invalidate the redo tail.
        self.redo_stack.clear();
        self.undo_stack.push(Snapshot {
            document,
            selection,
        });
        while self.undo_stack.len() > self.max_steps {
            self.undo_stack.remove(0);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pop the previous state, banking the current one for redo.
    pub fn undo(
        &mut self,
        current_document: RichDocument,
        current_selection: Selection,
    ) -> Option<(RichDocument, Selection)> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(Snapshot {
            document: current_document,
            selection: current_selection,
        });
        Some((snapshot.document, snapshot.selection))
    }

    /// Re-apply an undone state, banking the current one for undo.
    pub fn redo(
        &mut self,
        current_document: RichDocument,
        current_selection: Selection,
    ) -> Option<(RichDocument, Selection)> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(Snapshot {
            document: current_document,
            selection: current_selection,
        });
        Some((snapshot.document, snapshot.selection))
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
