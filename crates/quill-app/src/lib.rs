//! quill-app: host-facing state machines for the blog client.
//!
//! Each component is an owned state struct with pure transition
//! functions; effects (fetch tickets, submissions) are returned to the
//! host to apply rather than performed implicitly, and the only
//! suspension points are calls into the transport collaborator traits.

pub mod directory;
pub mod error;
pub mod feed;
pub mod form;
pub mod login;
pub mod reader;

#[cfg(test)]
pub(crate) mod mock;

pub use directory::{CategoryDirectory, TagDirectory};
pub use error::{Field, SubmitError, ValidationErrors};
pub use feed::{ApplyOutcome, Feed, FetchTicket, FilterState};
pub use form::PostForm;
pub use login::LoginForm;
pub use reader::{Reader, delete_post};

/// Marker for a destructive action the user has explicitly confirmed.
///
/// Delete operations take this token, so the destructive transport call
/// cannot be issued without the call site going through a confirmation
/// step first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
}
