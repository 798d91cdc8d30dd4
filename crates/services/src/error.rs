//! Shared error types for the services crate.
//!
//! Every failure here is a typed result surfaced verbatim to the caller;
//! storage deserialization problems never appear — they are swallowed into
//! safe defaults at the persistence boundary (corrupt data is no worse than
//! missing data).

use thiserror::Error;

use prep_core::model::NoteError;

/// Errors emitted by `CredentialDirectory` and `SessionManager`.
///
/// Display strings are the user-facing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthError {
    #[error("an account with this email already exists")]
    DuplicateAccount,

    #[error("no account found with this email")]
    AccountNotFound,

    #[error("incorrect password")]
    InvalidCredentials,
}

/// Errors emitted by `NotesService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotesError {
    #[error(transparent)]
    Validation(#[from] NoteError),

    #[error("note not found")]
    NotFound,
}

/// Errors emitted by `SyllabusService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyllabusError {
    #[error("syllabus entry not found")]
    NotFound,
}
