use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use prep_core::model::Session;
use storage::{KeyValueStore, keys};

use crate::directory::CredentialDirectory;
use crate::error::AuthError;
use crate::persist;

/// Pacing delay applied to `login` and `register`, purely for UX rhythm.
pub const DEFAULT_LOGIN_LATENCY: Duration = Duration::from_millis(500);

/// Holds the currently authenticated identity.
///
/// A small state machine: `Unauthenticated` (no cached session) or
/// `Authenticated` (one cached session, mirrored to the store so it survives
/// a restart). All transitions run under one async mutex, so a second
/// concurrent `login`/`register` queues behind the first instead of
/// interleaving — callers get sequential semantics without having to enforce
/// them at the UI boundary.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    directory: CredentialDirectory,
    latency: Duration,
    current: Mutex<Option<Session>>,
}

impl SessionManager {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, latency: Duration) -> Self {
        let directory = CredentialDirectory::new(Arc::clone(&store));
        Self {
            store,
            directory,
            latency,
            current: Mutex::new(None),
        }
    }

    /// Restores the persisted session, if any. Called once at startup.
    ///
    /// Malformed persisted data is removed from the store and ignored, not
    /// surfaced as an error.
    pub async fn restore(&self) -> Option<Session> {
        let mut current = self.current.lock().await;

        let key = keys::session();
        let raw = match self.store.get(&key).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%err, "could not read persisted session");
                return None;
            }
        };
        let raw = raw?;

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                debug!(user = %session.user_id(), "restored session");
                *current = Some(session.clone());
                Some(session)
            }
            Err(err) => {
                warn!(%err, "discarding malformed persisted session");
                persist::discard(self.store.as_ref(), &key).await;
                None
            }
        }
    }

    /// Authenticates against the credential directory.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AccountNotFound` or `AuthError::InvalidCredentials`
    /// verbatim from verification; the state stays `Unauthenticated`.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let mut current = self.current.lock().await;
        self.pace().await;

        let name = self.directory.verify(email, password).await?;
        let session = Session::for_account(email, name);
        persist::save(self.store.as_ref(), &keys::session(), &session).await;
        *current = Some(session.clone());
        Ok(session)
    }

    /// Registers a new account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DuplicateAccount` when the email is taken; the
    /// state stays `Unauthenticated`.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Session, AuthError> {
        let mut current = self.current.lock().await;
        self.pace().await;

        self.directory.register(email, password, name).await?;
        let session = Session::for_account(email, name);
        persist::save(self.store.as_ref(), &keys::session(), &session).await;
        *current = Some(session.clone());
        Ok(session)
    }

    /// Clears the session, in memory and in the store. Cannot fail.
    pub async fn logout(&self) {
        let mut current = self.current.lock().await;
        *current = None;
        persist::discard(self.store.as_ref(), &keys::session()).await;
    }

    /// Returns the active session, if any.
    pub async fn current(&self) -> Option<Session> {
        self.current.lock().await.clone()
    }

    async fn pace(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryStore;

    fn manager(store: &Arc<InMemoryStore>) -> SessionManager {
        SessionManager::new(store.clone(), Duration::ZERO)
    }

    #[tokio::test]
    async fn register_persists_a_restorable_session() {
        let store = Arc::new(InMemoryStore::new());
        let first = manager(&store);
        first.register("A@x.com", "p", "Ann").await.unwrap();

        // fresh instance over the same store, as after a restart
        let second = manager(&store);
        let restored = second.restore().await.expect("session survives restart");
        assert_eq!(restored.user_id().as_str(), "a@x.com");
        assert_eq!(restored.email(), "a@x.com");
        assert_eq!(restored.name(), "Ann");
    }

    #[tokio::test]
    async fn login_requires_exact_password_but_not_email_case() {
        let store = Arc::new(InMemoryStore::new());
        let mgr = manager(&store);
        mgr.register("a@x.com", "p", "Ann").await.unwrap();
        mgr.logout().await;

        assert_eq!(
            mgr.login("A@x.com", "P").await.unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert!(mgr.current().await.is_none());

        let session = mgr.login("A@x.com", "p").await.unwrap();
        assert_eq!(session.user_id().as_str(), "a@x.com");
    }

    #[tokio::test]
    async fn logout_clears_persisted_session() {
        let store = Arc::new(InMemoryStore::new());
        let mgr = manager(&store);
        mgr.register("a@x.com", "p", "Ann").await.unwrap();
        mgr.logout().await;
        assert!(mgr.current().await.is_none());

        let fresh = manager(&store);
        assert!(fresh.restore().await.is_none());
    }

    #[tokio::test]
    async fn malformed_persisted_session_is_discarded() {
        let store = Arc::new(InMemoryStore::new());
        store.set(&keys::session(), "not json").await.unwrap();

        let mgr = manager(&store);
        assert!(mgr.restore().await.is_none());
        // the remnant is cleared, not left to fail again
        assert!(store.get(&keys::session()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_login_leaves_state_unauthenticated() {
        let store = Arc::new(InMemoryStore::new());
        let mgr = manager(&store);

        assert_eq!(
            mgr.login("ghost@x.com", "p").await.unwrap_err(),
            AuthError::AccountNotFound
        );
        assert!(mgr.current().await.is_none());
        assert!(store.get(&keys::session()).await.unwrap().is_none());
    }
}
