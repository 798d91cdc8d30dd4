use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use prep_core::Clock;
use prep_core::model::{ProgressRecord, ProgressUpdate, UserId};
use storage::{KeyValueStore, keys};

use crate::persist;
use crate::session_manager::SessionManager;

/// Per-user study counters, scoped to the session manager's current user.
///
/// Without an active session every operation is a guarded no-op by design:
/// `read` hands back zero defaults without persisting anything, `update` does
/// nothing. The cache is keyed by user id, so switching accounts switches the
/// visible record with it.
pub struct ProgressService {
    store: Arc<dyn KeyValueStore>,
    session: Arc<SessionManager>,
    clock: Clock,
    cache: Mutex<HashMap<UserId, ProgressRecord>>,
}

impl ProgressService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, session: Arc<SessionManager>, clock: Clock) -> Self {
        Self {
            store,
            session,
            clock,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current user's record.
    ///
    /// The record is lazily created: on the very first read for a user the
    /// zero-default record is persisted. A malformed stored record resets to
    /// zero defaults rather than failing.
    pub async fn read(&self) -> ProgressRecord {
        let now = self.clock.now();
        let Some(session) = self.session.current().await else {
            return ProgressRecord::zeroed(now);
        };
        let user = session.user_id().clone();

        let mut cache = self.cache.lock().await;
        if let Some(record) = cache.get(&user) {
            return record.clone();
        }

        let key = keys::progress(&user);
        let record = match persist::load(self.store.as_ref(), &key, || {
            ProgressRecord::zeroed(now)
        })
        .await
        {
            Some(record) => record,
            None => {
                // first access for this user
                let record = ProgressRecord::zeroed(now);
                persist::save(self.store.as_ref(), &key, &record).await;
                record
            }
        };

        cache.insert(user, record.clone());
        record
    }

    /// Merges a partial update over the current record and persists it.
    ///
    /// `last_active` is refreshed on every call, even an empty one. No-op
    /// without an active session.
    pub async fn update(&self, update: ProgressUpdate) {
        let Some(session) = self.session.current().await else {
            return;
        };
        let user = session.user_id().clone();
        let now = self.clock.now();
        let key = keys::progress(&user);

        let mut cache = self.cache.lock().await;
        let mut record = match cache.get(&user) {
            Some(record) => record.clone(),
            None => persist::load(self.store.as_ref(), &key, || ProgressRecord::zeroed(now))
                .await
                .unwrap_or_else(|| ProgressRecord::zeroed(now)),
        };

        record.apply(&update, now);
        persist::save(self.store.as_ref(), &key, &record).await;
        cache.insert(user, record);
    }
}
