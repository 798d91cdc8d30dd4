use std::collections::BTreeMap;
use std::sync::Arc;

use prep_core::model::CredentialRecord;
use storage::{KeyValueStore, keys};

use crate::error::AuthError;
use crate::persist;

/// Account directory: normalized email → credential record.
///
/// The whole mapping is one blob under a fixed key, read fully into memory on
/// every operation. Records are write-once: registration inserts, nothing
/// mutates or deletes. A malformed blob deserializes to an empty directory,
/// which silently discards every account — accepted here for robustness, see
/// the implementation notes in DESIGN.md.
pub struct CredentialDirectory {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialDirectory {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Registers a new account under the normalized email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DuplicateAccount` when a record already exists for
    /// the normalized email.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(), AuthError> {
        let key = normalize(email);
        let mut accounts = self.accounts().await;

        if accounts.contains_key(&key) {
            return Err(AuthError::DuplicateAccount);
        }

        accounts.insert(key, CredentialRecord::new(password, name));
        persist::save(self.store.as_ref(), &keys::directory(), &accounts).await;
        Ok(())
    }

    /// Checks credentials and returns the stored display name.
    ///
    /// Email case is irrelevant; password comparison is exact and
    /// case-sensitive, in plain text by design.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AccountNotFound` when no record exists, or
    /// `AuthError::InvalidCredentials` on a password mismatch.
    pub async fn verify(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let accounts = self.accounts().await;
        let record = accounts
            .get(&normalize(email))
            .ok_or(AuthError::AccountNotFound)?;

        if !record.password_matches(password) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(record.display_name.clone())
    }

    async fn accounts(&self) -> BTreeMap<String, CredentialRecord> {
        persist::load(self.store.as_ref(), &keys::directory(), BTreeMap::new)
            .await
            .unwrap_or_default()
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}
