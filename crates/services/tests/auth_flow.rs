use std::sync::Arc;
use std::time::Duration;

use prep_core::time::fixed_clock;
use services::{AppServices, AuthError};
use storage::{InMemoryStore, JsonFileStore, KeyValueStore};

fn in_memory() -> (Arc<InMemoryStore>, AppServices) {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let services =
        AppServices::with_login_latency(store.clone(), fixed_clock(), Duration::ZERO);
    (store, services)
}

#[tokio::test]
async fn register_restart_restore() {
    let (store, services) = in_memory();
    services
        .session()
        .register("Ann@Example.com", "pw", "Ann")
        .await
        .unwrap();

    // fresh services over the same store, as after a process restart
    let services = AppServices::with_login_latency(store, fixed_clock(), Duration::ZERO);
    let restored = services.session().restore().await.expect("restorable");
    assert_eq!(restored.user_id().as_str(), "ann@example.com");
    assert_eq!(restored.email(), "ann@example.com");
    assert_eq!(restored.name(), "Ann");
}

#[tokio::test]
async fn logout_then_restart_is_unauthenticated() {
    let (store, services) = in_memory();
    let session = services.session();
    session.register("a@x.com", "pw", "Ann").await.unwrap();
    session.logout().await;

    let services = AppServices::with_login_latency(store, fixed_clock(), Duration::ZERO);
    assert!(services.session().restore().await.is_none());
    assert!(services.session().current().await.is_none());
}

#[tokio::test]
async fn login_error_reasons_are_specific() {
    let (_, services) = in_memory();
    let session = services.session();
    session.register("a@x.com", "pw", "Ann").await.unwrap();
    session.logout().await;

    assert_eq!(
        session.login("other@x.com", "pw").await.unwrap_err(),
        AuthError::AccountNotFound
    );
    assert_eq!(
        session.login("a@x.com", "PW").await.unwrap_err(),
        AuthError::InvalidCredentials
    );
    assert!(session.login("A@X.com", "pw").await.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_registrations_serialize() {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let services = AppServices::with_login_latency(
        store,
        fixed_clock(),
        Duration::from_millis(10),
    );
    let session = services.session();

    let (a, b) = tokio::join!(
        session.register("a@x.com", "pw", "First"),
        session.register("a@x.com", "pw", "Second"),
    );

    // exactly one wins; the other observes the completed registration
    assert_eq!(
        a.is_ok() as u8 + b.is_ok() as u8,
        1,
        "one register succeeds, one sees DuplicateAccount"
    );
    let loser = if a.is_err() { a } else { b };
    assert_eq!(loser.unwrap_err(), AuthError::DuplicateAccount);
    assert!(session.current().await.is_some());
}

#[tokio::test]
async fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prepdesk.json");

    {
        let store: Arc<JsonFileStore> = Arc::new(JsonFileStore::open(&path).unwrap());
        let services =
            AppServices::with_login_latency(store, fixed_clock(), Duration::ZERO);
        services
            .session()
            .register("a@x.com", "pw", "Ann")
            .await
            .unwrap();
        services.notes().create("q", "a").await.unwrap();
    }

    let store: Arc<JsonFileStore> = Arc::new(JsonFileStore::open(&path).unwrap());
    let services = AppServices::with_login_latency(store.clone(), fixed_clock(), Duration::ZERO);
    assert!(services.session().restore().await.is_some());
    assert_eq!(services.notes().list().await.len(), 1);
    assert_eq!(services.progress().read().await.subjective_answers, 1);

    // sanity: the session key really is on disk
    assert!(store.get("prepdesk.auth.session").await.unwrap().is_some());
}
