mod account;
mod ids;
mod note;
mod progress;
mod session;
mod syllabus;

pub use ids::{NoteId, ParseIdError, UserId};

pub use account::CredentialRecord;
pub use note::{Note, NoteError};
pub use progress::{ProgressRecord, ProgressUpdate};
pub use session::Session;
pub use syllabus::{SyllabusItem, SyllabusSection, SyllabusTopic, default_plan};
