use std::sync::Arc;

use prep_core::Clock;
use prep_core::model::{Note, NoteId, ProgressUpdate};
use storage::{KeyValueStore, keys};

use crate::error::NotesError;
use crate::persist;
use crate::progress::ProgressService;
use crate::session_manager::SessionManager;

/// Freeform notes for the current user, newest-created-first.
///
/// The whole collection is one blob per user; every mutation rewrites it.
/// Creating a note also bumps the progress store's `subjective_answers`
/// counter — edits and deletes do not.
pub struct NotesService {
    store: Arc<dyn KeyValueStore>,
    session: Arc<SessionManager>,
    progress: Arc<ProgressService>,
    clock: Clock,
}

impl NotesService {
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        session: Arc<SessionManager>,
        progress: Arc<ProgressService>,
        clock: Clock,
    ) -> Self {
        Self {
            store,
            session,
            progress,
            clock,
        }
    }

    /// All notes for the current user, newest first. Empty without a session
    /// or when the stored blob is malformed.
    pub async fn list(&self) -> Vec<Note> {
        let Some(session) = self.session.current().await else {
            return Vec::new();
        };
        let key = keys::notes(session.user_id());
        persist::load(self.store.as_ref(), &key, Vec::new)
            .await
            .unwrap_or_default()
    }

    /// Creates a note and prepends it to the list.
    ///
    /// Returns `Ok(None)` without an active session (guarded no-op).
    ///
    /// # Errors
    ///
    /// Returns `NotesError::Validation` when title or content is empty after
    /// trimming; the list is left unchanged.
    pub async fn create(&self, title: &str, content: &str) -> Result<Option<Note>, NotesError> {
        let Some(session) = self.session.current().await else {
            return Ok(None);
        };
        let key = keys::notes(session.user_id());
        let mut notes: Vec<Note> = persist::load(self.store.as_ref(), &key, Vec::new)
            .await
            .unwrap_or_default();

        let now = self.clock.now();
        let mut id = NoteId::from_timestamp(now);
        while notes.iter().any(|n| n.id() == id) {
            id = id.next();
        }

        let note = Note::new(id, title, content, now)?;
        notes.insert(0, note.clone());
        persist::save(self.store.as_ref(), &key, &notes).await;

        let answers = self.progress.read().await.subjective_answers;
        self.progress
            .update(ProgressUpdate::new().subjective_answers(answers + 1))
            .await;

        Ok(Some(note))
    }

    /// Replaces a note's title and content in place.
    ///
    /// No progress counter moves here; only creation counts. No-op without a
    /// session.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::Validation` on empty fields or
    /// `NotesError::NotFound` when the id is not in the current user's list.
    pub async fn update(&self, id: NoteId, title: &str, content: &str) -> Result<(), NotesError> {
        let Some(session) = self.session.current().await else {
            return Ok(());
        };
        let key = keys::notes(session.user_id());
        let mut notes: Vec<Note> = persist::load(self.store.as_ref(), &key, Vec::new)
            .await
            .unwrap_or_default();

        let note = notes
            .iter_mut()
            .find(|n| n.id() == id)
            .ok_or(NotesError::NotFound)?;
        note.edit(title, content, self.clock.now())?;

        persist::save(self.store.as_ref(), &key, &notes).await;
        Ok(())
    }

    /// Removes exactly one note. No-op without a session.
    ///
    /// # Errors
    ///
    /// Returns `NotesError::NotFound` when the id is absent; the list is left
    /// unmodified.
    pub async fn delete(&self, id: NoteId) -> Result<(), NotesError> {
        let Some(session) = self.session.current().await else {
            return Ok(());
        };
        let key = keys::notes(session.user_id());
        let mut notes: Vec<Note> = persist::load(self.store.as_ref(), &key, Vec::new)
            .await
            .unwrap_or_default();

        let before = notes.len();
        notes.retain(|n| n.id() != id);
        if notes.len() == before {
            return Err(NotesError::NotFound);
        }

        persist::save(self.store.as_ref(), &key, &notes).await;
        Ok(())
    }
}
