use std::sync::Arc;
use std::time::Duration;

use prep_core::Clock;
use storage::KeyValueStore;

use crate::notes::NotesService;
use crate::progress::ProgressService;
use crate::session_manager::{DEFAULT_LOGIN_LATENCY, SessionManager};
use crate::syllabus::SyllabusService;

/// Assembles the data-layer services over one shared store.
///
/// The session manager is the one required dependency of every per-user
/// store, wired here at construction time rather than looked up ambiently.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<SessionManager>,
    progress: Arc<ProgressService>,
    notes: Arc<NotesService>,
    syllabus: Arc<SyllabusService>,
}

impl AppServices {
    /// Builds services with the default login pacing latency.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Clock) -> Self {
        Self::with_login_latency(store, clock, DEFAULT_LOGIN_LATENCY)
    }

    /// Builds services with an explicit pacing latency (zero in tests).
    #[must_use]
    pub fn with_login_latency(
        store: Arc<dyn KeyValueStore>,
        clock: Clock,
        latency: Duration,
    ) -> Self {
        let session = Arc::new(SessionManager::new(Arc::clone(&store), latency));
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&store),
            Arc::clone(&session),
            clock,
        ));
        let notes = Arc::new(NotesService::new(
            Arc::clone(&store),
            Arc::clone(&session),
            Arc::clone(&progress),
            clock,
        ));
        let syllabus = Arc::new(SyllabusService::new(
            Arc::clone(&store),
            Arc::clone(&session),
        ));

        Self {
            session,
            progress,
            notes,
            syllabus,
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionManager> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn notes(&self) -> Arc<NotesService> {
        Arc::clone(&self.notes)
    }

    #[must_use]
    pub fn syllabus(&self) -> Arc<SyllabusService> {
        Arc::clone(&self.syllabus)
    }
}
