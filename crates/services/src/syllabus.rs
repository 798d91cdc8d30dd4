use std::sync::Arc;

use prep_core::model::{SyllabusSection, default_plan};
use storage::{KeyValueStore, keys};

use crate::error::SyllabusError;
use crate::persist;
use crate::session_manager::SessionManager;

/// Per-user syllabus checklist.
///
/// Users start from the built-in plan; only leaf completion flags change, and
/// the whole tree is persisted on every toggle. Absent or malformed data
/// falls back to the pristine plan.
pub struct SyllabusService {
    store: Arc<dyn KeyValueStore>,
    session: Arc<SessionManager>,
}

impl SyllabusService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, session: Arc<SessionManager>) -> Self {
        Self { store, session }
    }

    /// The current user's checklist tree, or the pristine plan without a
    /// session.
    pub async fn sections(&self) -> Vec<SyllabusSection> {
        let Some(session) = self.session.current().await else {
            return default_plan();
        };
        let key = keys::syllabus(session.user_id());
        persist::load(self.store.as_ref(), &key, default_plan)
            .await
            .unwrap_or_else(default_plan)
    }

    /// Flips one leaf's completion flag and persists the tree. No-op without
    /// a session.
    ///
    /// # Errors
    ///
    /// Returns `SyllabusError::NotFound` when any of the three ids is
    /// unknown.
    pub async fn toggle(
        &self,
        section_id: &str,
        topic_id: &str,
        item_id: &str,
    ) -> Result<(), SyllabusError> {
        let Some(session) = self.session.current().await else {
            return Ok(());
        };
        let key = keys::syllabus(session.user_id());
        let mut sections = persist::load(self.store.as_ref(), &key, default_plan)
            .await
            .unwrap_or_else(default_plan);

        let section = sections
            .iter_mut()
            .find(|s| s.id == section_id)
            .ok_or(SyllabusError::NotFound)?;
        if !section.toggle(topic_id, item_id) {
            return Err(SyllabusError::NotFound);
        }

        persist::save(self.store.as_ref(), &key, &sections).await;
        Ok(())
    }
}
