use serde::{Deserialize, Serialize};

use crate::model::UserId;

/// The currently authenticated identity.
///
/// `id` and `email` are both the normalized (lower-cased) address; `name` is
/// the display name captured at registration. At most one session is active
/// per running instance, and it is persisted so it survives a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: UserId,
    email: String,
    name: String,
}

impl Session {
    /// Builds a session for a verified account, normalizing the email.
    #[must_use]
    pub fn for_account(email: &str, name: impl Into<String>) -> Self {
        let id = UserId::from_email(email);
        let email = id.as_str().to_owned();
        Self {
            id,
            email,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_equals_normalized_email() {
        let session = Session::for_account("Bob@Mail.COM", "Bob");
        assert_eq!(session.user_id().as_str(), "bob@mail.com");
        assert_eq!(session.email(), "bob@mail.com");
        assert_eq!(session.name(), "Bob");
    }
}
