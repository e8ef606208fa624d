//! quill-editor-core: the rich document model and editing surface.
//!
//! This crate provides:
//! - `RichDocument` - block/span document model, the editing-time source
//!   of truth for post content
//! - `Editor` - command-driven editing surface with selection tracking,
//!   active-mark queries, and undo/redo
//! - `import_markdown` - all-or-nothing markdown → document conversion
//! - HTML serialization and ingestion in the sanitizer dialect, so the
//!   write path and the read path agree on the document vocabulary

pub mod document;
pub mod editor;
pub mod error;
pub mod history;
pub mod html;
pub mod markdown;
pub mod types;

pub use document::{Block, RichDocument, TextSpan};
pub use editor::{Editor, EditorCommand};
pub use error::ConversionError;
pub use history::History;
pub use html::{EMPTY_DOCUMENT_HTML, document_from_html, serialize};
pub use markdown::import_markdown;
pub use types::{BlockKind, HeadingLevel, ListKind, Mark, Marks, Position, Selection};
