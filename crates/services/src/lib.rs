#![forbid(unsafe_code)]

pub mod app_services;
pub mod directory;
pub mod error;
pub mod notes;
pub mod progress;
pub mod session_manager;
pub mod syllabus;

mod persist;

pub use prep_core::Clock;

pub use app_services::AppServices;
pub use directory::CredentialDirectory;
pub use error::{AuthError, NotesError, SyllabusError};
pub use notes::NotesService;
pub use progress::ProgressService;
pub use session_manager::{DEFAULT_LOGIN_LATENCY, SessionManager};
pub use syllabus::SyllabusService;
