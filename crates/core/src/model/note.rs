use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::NoteId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NoteError {
    #[error("note title must not be empty")]
    EmptyTitle,

    #[error("note content must not be empty")]
    EmptyContent,
}

/// A freeform study note owned by exactly one user.
///
/// Ordering within a user's collection is newest-created-first; the owning
/// store maintains that by prepending on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    id: NoteId,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a note, trimming and validating title and content.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::EmptyTitle` or `NoteError::EmptyContent` when the
    /// corresponding field is empty after trimming.
    pub fn new(
        id: NoteId,
        title: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, NoteError> {
        let (title, content) = validated(title, content)?;
        Ok(Self {
            id,
            title,
            content,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces title and content in place, refreshing `updated_at` only.
    ///
    /// # Errors
    ///
    /// Same validation as [`Note::new`].
    pub fn edit(&mut self, title: &str, content: &str, now: DateTime<Utc>) -> Result<(), NoteError> {
        let (title, content) = validated(title, content)?;
        self.title = title;
        self.content = content;
        self.updated_at = now;
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> NoteId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn validated(title: &str, content: &str) -> Result<(String, String), NoteError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(NoteError::EmptyTitle);
    }
    let content = content.trim();
    if content.is_empty() {
        return Err(NoteError::EmptyContent);
    }
    Ok((title.to_owned(), content.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    #[test]
    fn rejects_blank_title_and_content() {
        let now = fixed_now();
        let id = NoteId::from_timestamp(now);

        assert_eq!(
            Note::new(id, "   ", "body", now).unwrap_err(),
            NoteError::EmptyTitle
        );
        assert_eq!(
            Note::new(id, "title", "\n\t", now).unwrap_err(),
            NoteError::EmptyContent
        );
    }

    #[test]
    fn edit_refreshes_updated_at_but_not_created_at() {
        let now = fixed_now();
        let mut note = Note::new(NoteId::from_timestamp(now), "q", "a", now).unwrap();

        let later = now + Duration::minutes(3);
        note.edit("q2", "a2", later).unwrap();

        assert_eq!(note.title(), "q2");
        assert_eq!(note.content(), "a2");
        assert_eq!(note.created_at(), now);
        assert_eq!(note.updated_at(), later);
    }

    #[test]
    fn trims_title_and_content() {
        let now = fixed_now();
        let note = Note::new(NoteId::from_timestamp(now), "  q  ", " a \n", now).unwrap();
        assert_eq!(note.title(), "q");
        assert_eq!(note.content(), "a");
    }
}
