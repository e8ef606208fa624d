//! quill-renderer: allow-list sanitization and the safe render tree.
//!
//! This crate provides:
//! - `sanitize` - allow-list HTML cleaning (pure, total, idempotent)
//! - `SafeFragment`/`SafeNode` - a parsed tree of sanitized content
//! - `render_content` - the single choke-point turning a stored post's
//!   raw `content` field into something the host UI may display
//! - `plain_excerpt` - markup-free preview text for post cards

pub mod fragment;
pub mod policy;
pub mod sanitize;
pub mod view;

pub use fragment::{SafeFragment, SafeNode};
pub use sanitize::sanitize;
pub use view::{plain_excerpt, render_content};
