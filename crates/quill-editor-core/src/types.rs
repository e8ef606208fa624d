//! Core editor types: marks, block kinds, positions, and selections.
//!
//! These types are host-agnostic; the editing surface and the queries
//! over it are built from them.

use bitflags::bitflags;

bitflags! {
    /// Inline marks attached to a text span.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Marks: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
    }
}

/// A single inline mark, as toggled from the toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    Bold,
    Italic,
}

impl Mark {
    pub fn as_flag(self) -> Marks {
        match self {
            Mark::Bold => Marks::BOLD,
            Mark::Italic => Marks::ITALIC,
        }
    }
}

/// Heading depth supported by the editor dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Clamp an arbitrary 1-based depth into the supported range.
    pub fn clamp_from(depth: u8) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

/// List flavor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Ordered,
}

/// Structural kind of a block node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading(HeadingLevel),
    ListItem(ListKind),
    CodeBlock,
}

/// A position in the document: block index plus character offset into
/// the block's text (NOT a byte offset).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub block: usize,
    pub offset: usize,
}

impl Position {
    /// The start of the document.
    pub const START: Position = Position { block: 0, offset: 0 };

    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

/// Selection with anchor and head positions.
///
/// The anchor is where the selection started, the head is where the
/// cursor is now. They may be in any order - use `start()` and `end()`
/// for ordered bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Where selection started
    pub anchor: Position,
    /// Where cursor is now
    pub head: Position,
}

impl Selection {
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// A collapsed selection (caret only).
    pub fn collapsed(at: Position) -> Self {
        Self {
            anchor: at,
            head: at,
        }
    }

    /// Ordered lower bound.
    pub fn start(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// Ordered upper bound.
    pub fn end(&self) -> Position {
        self.anchor.max(self.head)
    }

    /// Whether the selection is collapsed (caret only, no range).
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Whether the head sits before the anchor.
    pub fn is_backwards(&self) -> bool {
        self.head < self.anchor
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::collapsed(Position::START)
    }
}
