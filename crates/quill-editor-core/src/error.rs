//! Error types for the editor core.

use miette::Diagnostic;
use thiserror::Error;

/// Markdown import failure.
///
/// Import is all-or-nothing: when conversion fails the caller's live
/// document is untouched, and the input can be edited and retried.
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum ConversionError {
    /// Raw HTML has no representation in the editor dialect.
    #[error("markdown contains raw HTML: {fragment}")]
    #[diagnostic(
        code(quill::markdown::raw_html),
        help("Remove the embedded HTML and import again")
    )]
    RawHtml { fragment: String },
}
