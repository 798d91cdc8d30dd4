use serde::{Deserialize, Serialize};

/// One registered account in the credential directory.
///
/// Passwords are stored and compared as plain text. That is a documented
/// property of this personal, local-only system, not an oversight; there is
/// no hashing and no delete path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub password: String,
    pub display_name: String,
}

impl CredentialRecord {
    #[must_use]
    pub fn new(password: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            display_name: display_name.into(),
        }
    }

    /// Exact, case-sensitive password comparison.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}
