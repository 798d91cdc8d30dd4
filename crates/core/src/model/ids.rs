use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a user account.
///
/// The id is the account email, trimmed and lower-cased. Normalizing at
/// construction means every per-user storage key and directory lookup agrees
/// on the same spelling regardless of how the caller typed the address.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Builds a `UserId` from an email address, normalizing it.
    #[must_use]
    pub fn from_email(email: &str) -> Self {
        Self(email.trim().to_lowercase())
    }

    /// Returns the normalized email backing this id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a Note.
///
/// Assigned from the creation timestamp in milliseconds. Unique enough within
/// one running instance; callers bump with [`NoteId::next`] on collision.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Creates a `NoteId` from a raw millisecond value.
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Derives a `NoteId` from a creation timestamp.
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }

    /// Returns the id immediately after this one.
    #[must_use]
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the underlying i64 value.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing an id from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for NoteId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(NoteId::new).map_err(|_| ParseIdError {
            kind: "NoteId".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn user_id_normalizes_case_and_whitespace() {
        let id = UserId::from_email("  Alice@Example.COM ");
        assert_eq!(id.as_str(), "alice@example.com");
        assert_eq!(id, UserId::from_email("alice@example.com"));
    }

    #[test]
    fn note_id_from_timestamp_is_millis() {
        let id = NoteId::from_timestamp(fixed_now());
        assert_eq!(id.value(), 1_720_000_000_000);
    }

    #[test]
    fn note_id_next_bumps_by_one() {
        let id = NoteId::new(42);
        assert_eq!(id.next(), NoteId::new(43));
    }

    #[test]
    fn note_id_roundtrip() {
        let original = NoteId::new(1_720_000_000_123);
        let deserialized: NoteId = original.to_string().parse().unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn note_id_from_str_invalid() {
        assert!("not-a-number".parse::<NoteId>().is_err());
    }
}
