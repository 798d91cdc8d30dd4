use std::sync::Arc;
use std::time::Duration;

use prep_core::model::{NoteError, ProgressUpdate};
use prep_core::time::fixed_clock;
use services::{AppServices, NotesError};
use storage::InMemoryStore;

async fn signed_in() -> AppServices {
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let services =
        AppServices::with_login_latency(store, fixed_clock(), Duration::ZERO);
    services
        .session()
        .register("a@x.com", "pw", "Ann")
        .await
        .unwrap();
    services
}

#[tokio::test]
async fn progress_merges_never_replace() {
    let services = signed_in().await;
    let progress = services.progress();

    progress.update(ProgressUpdate::new().mcq_completed(2)).await;
    progress
        .update(ProgressUpdate::new().typing_minutes(10))
        .await;

    let record = progress.read().await;
    assert_eq!(
        (
            record.mcq_completed,
            record.typing_minutes,
            record.subjective_answers
        ),
        (2, 10, 0)
    );
}

#[tokio::test]
async fn note_creation_feeds_the_progress_counter() {
    let services = signed_in().await;

    assert_eq!(
        services.notes().create("", "content").await.unwrap_err(),
        NotesError::Validation(NoteError::EmptyTitle)
    );
    assert!(services.notes().list().await.is_empty());
    assert_eq!(services.progress().read().await.subjective_answers, 0);

    let note = services
        .notes()
        .create("Answer outline", "Three points...")
        .await
        .unwrap()
        .unwrap();
    let listed = services.notes().list().await;
    assert_eq!(listed.first().map(prep_core::model::Note::id), Some(note.id()));
    assert_eq!(services.progress().read().await.subjective_answers, 1);
}

#[tokio::test]
async fn per_user_data_is_namespaced() {
    let services = signed_in().await;
    services.notes().create("ann's note", "x").await.unwrap();
    services
        .syllabus()
        .toggle("written", "networking", "cn-1")
        .await
        .unwrap();

    let session = services.session();
    session.logout().await;
    session.register("b@x.com", "pw", "Bea").await.unwrap();

    assert!(services.notes().list().await.is_empty());
    assert_eq!(services.progress().read().await.mcq_completed, 0);
    let fresh = services.syllabus().sections().await;
    assert_eq!(fresh, prep_core::model::default_plan());

    // Ann's data is still there when she signs back in
    session.logout().await;
    session.login("a@x.com", "pw").await.unwrap();
    assert_eq!(services.notes().list().await.len(), 1);
}

#[tokio::test]
async fn syllabus_roundtrip_with_progress_percent() {
    let services = signed_in().await;
    let syllabus = services.syllabus();

    syllabus
        .toggle("practical", "typing-practical", "tp-1")
        .await
        .unwrap();

    let sections = syllabus.sections().await;
    let practical = sections.iter().find(|s| s.id == "practical").unwrap();
    assert_eq!(practical.progress_percent(), 20);
}
