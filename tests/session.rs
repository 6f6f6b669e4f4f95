mod common;

use std::sync::Arc;

use bookshelf::book::{BookDraft, BookId, BookPatch};
use bookshelf::client::{ClientError, FALLBACK_MESSAGE};
use bookshelf::ui::books::BookCollection;
use bookshelf::ui::bootstrap::BootstrapState;
use bookshelf::ui::session::BookSession;
use common::mock_api::MockApi;
use common::{book, draft, ids};
use parking_lot::Mutex;

async fn mounted(api: MockApi) -> BookSession<MockApi> {
    let session = BookSession::new(api);
    assert_eq!(session.mount().await, BootstrapState::Ready);
    session
}

#[tokio::test]
async fn new_session_is_uninitialized_and_empty() {
    let session = BookSession::new(MockApi::new());
    assert_eq!(session.bootstrap().state(), BootstrapState::Uninitialized);
    assert!(session.collection().is_empty());
    assert_eq!(session.api().list_calls(), 0);
}

#[tokio::test]
async fn mount_loads_collection_in_server_order() {
    let api = MockApi::with_books(vec![book("2", "B"), book("1", "A")]);
    let session = mounted(api).await;

    assert_eq!(ids(session.collection().books()), vec!["2", "1"]);
}

#[tokio::test]
async fn mount_issues_exactly_one_list_call() {
    let session = mounted(MockApi::new()).await;
    assert_eq!(session.mount().await, BootstrapState::Ready);
    assert_eq!(session.api().list_calls(), 1);
}

#[tokio::test]
async fn failed_mount_is_terminal_and_not_retried() {
    let api = MockApi::with_books(vec![book("1", "A")]);
    api.fail_list(ClientError::Transport(FALLBACK_MESSAGE.to_string()));
    let session = BookSession::new(api);

    let state = session.mount().await;
    assert_eq!(state.error(), Some(FALLBACK_MESSAGE));
    assert!(session.collection().is_empty());

    assert_eq!(session.mount().await, state);
    assert_eq!(session.api().list_calls(), 1);
}

#[tokio::test]
async fn create_prepends_server_confirmed_book() {
    let session = mounted(MockApi::with_books(vec![book("1", "A")])).await;

    let created = session.create(draft("New")).await.unwrap();
    let collection = session.collection();
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.books()[0], created);
    assert_ne!(created.id, BookId::from("1"));
}

#[tokio::test]
async fn rejected_create_leaves_collection_unchanged() {
    let session = mounted(MockApi::with_books(vec![book("1", "A")])).await;
    let before = session.collection();

    let err = session
        .create(BookDraft {
            title: String::new(),
            description: "x".to_string(),
            rating: 5,
            comment: "y".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert!(err.message().contains("title"));
    assert_eq!(session.collection(), before);
}

#[tokio::test]
async fn update_replaces_and_moves_to_front() {
    let session = mounted(MockApi::with_books(vec![book("1", "A"), book("2", "B")])).await;

    let patch = BookPatch {
        title: Some("B2".to_string()),
        ..BookPatch::default()
    };
    session.update(&BookId::from("2"), patch).await.unwrap();

    let collection = session.collection();
    assert_eq!(ids(collection.books()), vec!["2", "1"]);
    assert_eq!(collection.books()[0].title, "B2");
    assert_eq!(collection.books()[1].title, "A");
}

#[tokio::test]
async fn delete_removes_entry() {
    let session = mounted(MockApi::with_books(vec![book("1", "A"), book("2", "B")])).await;

    session.delete(&BookId::from("1")).await.unwrap();
    assert_eq!(ids(session.collection().books()), vec!["2"]);
}

#[tokio::test]
async fn delete_of_unknown_id_fails_and_keeps_collection() {
    let session = mounted(MockApi::with_books(vec![book("1", "A")])).await;
    let before = session.collection();

    let err = session.delete(&BookId::from("nope")).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert_eq!(session.collection(), before);
}

#[tokio::test]
async fn fetch_does_not_touch_collection() {
    let session = mounted(MockApi::with_books(vec![book("1", "A"), book("2", "B")])).await;
    let before = session.collection();

    let fetched = session.fetch(&BookId::from("1")).await.unwrap();
    assert_eq!(fetched.title, "A");
    assert_eq!(session.collection(), before);
}

#[tokio::test]
async fn subscribers_observe_each_confirmed_mutation() {
    let session = BookSession::new(MockApi::new());
    let lengths = Arc::new(Mutex::new(Vec::new()));
    let sink = lengths.clone();
    session
        .books()
        .subscribe(move |c: &BookCollection| sink.lock().push(c.len()));

    session.mount().await;
    let created = session.create(draft("One")).await.unwrap();
    let _ = session
        .create(BookDraft {
            rating: 1,
            ..draft("")
        })
        .await;
    session.delete(&created.id).await.unwrap();

    assert_eq!(*lengths.lock(), vec![0, 1, 0]);
}
