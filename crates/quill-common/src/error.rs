//! Transport error taxonomy.

use miette::Diagnostic;
use thiserror::Error;

/// Failures surfaced by the transport collaborators.
///
/// Always user-visible; the operation is abandoned and the core never
/// retries automatically. The caller may re-invoke manually.
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum TransportError {
    #[error("network error: {message}")]
    #[diagnostic(code(quill::transport::network))]
    Network { message: String },

    #[error("server rejected the request with status {status}: {message}")]
    #[diagnostic(code(quill::transport::status))]
    Status { status: u16, message: String },

    #[error("not authenticated")]
    #[diagnostic(
        code(quill::transport::unauthenticated),
        help("Sign in, then retry the operation")
    )]
    Unauthenticated,

    #[error("bad credentials")]
    #[diagnostic(code(quill::transport::credentials))]
    BadCredentials,

    #[error("no such entity: {id}")]
    #[diagnostic(code(quill::transport::not_found))]
    NotFound { id: String },
}

pub type Result<T> = std::result::Result<T, TransportError>;
