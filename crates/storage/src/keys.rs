//! Key layout for the persistent store.
//!
//! Everything lives under one application prefix. Auth state is global;
//! progress, notes, and syllabus keys carry the owning user's id so that
//! switching the active user switches the visible record set entirely.

use prep_core::model::UserId;

const PREFIX: &str = "prepdesk";

/// Key holding the serialized current session, if any.
#[must_use]
pub fn session() -> String {
    format!("{PREFIX}.auth.session")
}

/// Key holding the whole credential directory as one blob.
#[must_use]
pub fn directory() -> String {
    format!("{PREFIX}.auth.directory")
}

/// Per-user progress record key.
#[must_use]
pub fn progress(user: &UserId) -> String {
    format!("{PREFIX}.progress.{user}")
}

/// Per-user notes collection key.
#[must_use]
pub fn notes(user: &UserId) -> String {
    format!("{PREFIX}.notes.{user}")
}

/// Per-user syllabus checklist key.
#[must_use]
pub fn syllabus(user: &UserId) -> String {
    format!("{PREFIX}.syllabus.{user}")
}
