use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user study counters.
///
/// Exactly one record exists per user id, lazily created with zero defaults
/// on first access. Counters only ever grow through merges; the record is
/// never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub mcq_completed: u32,
    pub typing_minutes: u32,
    pub subjective_answers: u32,
    pub last_active: DateTime<Utc>,
}

impl ProgressRecord {
    /// The all-zero record a user starts with.
    #[must_use]
    pub fn zeroed(now: DateTime<Utc>) -> Self {
        Self {
            mcq_completed: 0,
            typing_minutes: 0,
            subjective_answers: 0,
            last_active: now,
        }
    }

    /// Merges a partial update over this record.
    ///
    /// Fields absent from the update keep their prior values; `last_active`
    /// is always refreshed to `now` as a side effect of any merge.
    pub fn apply(&mut self, update: &ProgressUpdate, now: DateTime<Utc>) {
        if let Some(mcq) = update.mcq_completed {
            self.mcq_completed = mcq;
        }
        if let Some(minutes) = update.typing_minutes {
            self.typing_minutes = minutes;
        }
        if let Some(answers) = update.subjective_answers {
            self.subjective_answers = answers;
        }
        self.last_active = now;
    }
}

/// Partial counterpart of [`ProgressRecord`] for merge updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub mcq_completed: Option<u32>,
    pub typing_minutes: Option<u32>,
    pub subjective_answers: Option<u32>,
}

impl ProgressUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mcq_completed(mut self, value: u32) -> Self {
        self.mcq_completed = Some(value);
        self
    }

    #[must_use]
    pub fn typing_minutes(mut self, value: u32) -> Self {
        self.typing_minutes = Some(value);
        self
    }

    #[must_use]
    pub fn subjective_answers(mut self, value: u32) -> Self {
        self.subjective_answers = Some(value);
        self
    }

    /// Returns true when no field is set. A merge of an empty update still
    /// refreshes `last_active`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mcq_completed.is_none()
            && self.typing_minutes.is_none()
            && self.subjective_answers.is_none()
    }
}
