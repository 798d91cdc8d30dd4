//! Small helpers over the key-value store shared by every service.
//!
//! Two policies live here, both deliberate:
//! - a value that fails to deserialize is replaced by its default (corrupt
//!   data is no worse than missing data), with a warning so the silent-loss
//!   risk at least leaves a trace;
//! - write failures are logged and dropped, never propagated. Callers do not
//!   check a result; a full or read-only backend degrades the app to
//!   in-memory behavior instead of failing user operations.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use storage::KeyValueStore;

/// Loads and deserializes `key`, falling back when absent or malformed.
///
/// Returns `None` only when the key is absent; a present-but-corrupt value
/// yields `Some(fallback())` so callers can distinguish first access.
pub(crate) async fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    fallback: impl FnOnce() -> T,
) -> Option<T> {
    let raw = match store.get(key).await {
        Ok(raw) => raw?,
        Err(err) => {
            warn!(key, %err, "store read failed, treating as absent");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, %err, "discarding malformed value");
            Some(fallback())
        }
    }
}

/// Serializes and stores `value` under `key`. Failures are logged, not returned.
pub(crate) async fn save<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(key, %err, "failed to serialize value, skipping write");
            return;
        }
    };
    if let Err(err) = store.set(key, &raw).await {
        warn!(key, %err, "store write failed, keeping in-memory state only");
    }
}

/// Removes `key`. Failures are logged, not returned.
pub(crate) async fn discard(store: &dyn KeyValueStore, key: &str) {
    if let Err(err) = store.remove(key).await {
        warn!(key, %err, "store remove failed");
    }
}
