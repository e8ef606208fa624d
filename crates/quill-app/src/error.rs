//! Error types at the form boundary.

use std::collections::BTreeMap;

use miette::Diagnostic;
use quill_common::TransportError;
use thiserror::Error;

/// Fields of the composition form that can fail validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Title,
    Content,
    Category,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
            Field::Category => "category",
        }
    }
}

/// Field-keyed validation failures.
///
/// User-correctable; blocks submission and is never sent to transport.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// Submission failure: local validation or the transport call.
#[derive(Debug, Error, Diagnostic)]
pub enum SubmitError {
    #[error("validation failed for {} field(s)", .0.len())]
    #[diagnostic(code(quill::form::validation))]
    Validation(ValidationErrors),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Transport(#[from] TransportError),
}
