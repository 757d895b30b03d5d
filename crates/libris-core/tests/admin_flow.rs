//! End-to-end admin screen flows against the in-memory store.

use libris_core::form::FormMode;
use libris_core::model::DraftField;
use libris_core::preview::ObjectUrls;
use libris_core::store::{Operation, StoreCall};
use libris_core::{
    AdminScreen, Book, BookDraft, BookId, BookStore, CoverFile, ImageResolver, MemoryStore,
    StoreError,
};

fn resolver() -> ImageResolver {
    ImageResolver::new("http://localhost:3001")
}

fn seeded() -> MemoryStore {
    MemoryStore::with_books(vec![
        Book::new("1", "Moby Dick", "Melville").with_description("Whales"),
        Book::new("2", "Emma", "Austen").with_cover("/uploads/emma.jpg"),
        Book::new("3", "Ulysses", "Joyce"),
    ])
}

fn cover(name: &str) -> CoverFile {
    CoverFile::from_bytes(name, vec![0x89, b'P', b'N', b'G']).unwrap()
}

#[tokio::test]
async fn test_displayed_count_matches_store_after_fetch() {
    for n in [0usize, 1, 4, 10] {
        let books = (1..=n)
            .map(|i| Book::new(i.to_string(), format!("Title {i}"), "Author"))
            .collect();
        let store = MemoryStore::with_books(books);
        let mut screen = AdminScreen::new(resolver());

        screen.activate(&store).await;

        assert_eq!(screen.displayed_count(), n);
        assert!(!screen.is_loading());
        assert!(screen.banner().is_none());
    }
}

#[tokio::test]
async fn test_activation_failure_shows_banner_and_empty_list() {
    let store = seeded();
    store
        .fail_next(Operation::List, StoreError::network("HTTP 500"))
        .await;
    let mut screen = AdminScreen::new(resolver());

    screen.activate(&store).await;

    assert_eq!(screen.displayed_count(), 0);
    assert_eq!(screen.banner_message().as_deref(), Some("Failed to load books"));
}

#[tokio::test]
async fn test_edit_then_cancel_leaves_store_unchanged() {
    let store = seeded();
    let before = store.books().await;
    let mut screen = AdminScreen::new(resolver());
    screen.activate(&store).await;

    assert!(screen.open_edit(&BookId::new("2")));
    screen.set_field(DraftField::Title, "Emma (revised)").unwrap();
    screen.select_file(cover("new.png")).unwrap();
    screen.cancel_form();

    assert_eq!(store.books().await, before);
    assert_eq!(store.mutation_count().await, 0);
    assert_eq!(screen.form().mode(), &FormMode::Closed);
}

#[tokio::test]
async fn test_reselecting_file_does_not_leak_previews() {
    let urls = ObjectUrls::new();
    let mut screen = AdminScreen::with_urls(resolver(), urls.clone());
    screen.open_new();

    for name in ["a.jpg", "b.jpg", "c.jpg"] {
        screen.select_file(cover(name)).unwrap();
        assert_eq!(urls.live_count(), 1);
    }

    screen.cancel_form();
    assert_eq!(urls.live_count(), 0);
}

#[tokio::test]
async fn test_failed_save_keeps_form_open_with_draft() {
    let store = seeded();
    let mut screen = AdminScreen::new(resolver());
    screen.activate(&store).await;
    screen.open_edit(&BookId::new("1"));
    screen.set_field(DraftField::Description, "A whale of a tale").unwrap();

    store
        .fail_next(
            Operation::Update,
            StoreError::validation("Description too long"),
        )
        .await;
    let saved = screen.save(&store).await;

    assert!(!saved);
    assert_eq!(
        screen.form().mode(),
        &FormMode::EditingExisting(BookId::new("1"))
    );
    assert_eq!(screen.form().draft().description, "A whale of a tale");
    assert_eq!(screen.form_error(), Some("Description too long"));
    assert!(screen.can_submit());
    assert_eq!(store.books().await[0].description, "Whales");
}

#[tokio::test]
async fn test_network_save_failure_uses_generic_message() {
    let store = MemoryStore::new();
    let mut screen = AdminScreen::new(resolver());
    screen.activate(&store).await;
    screen.open_new();
    screen.set_field(DraftField::Title, "T").unwrap();
    screen.set_field(DraftField::Author, "A").unwrap();

    store
        .fail_next(Operation::Create, StoreError::network("connection reset"))
        .await;
    screen.save(&store).await;

    assert_eq!(screen.form_error(), Some("Failed to save book"));
    assert!(screen.form().is_open());
}

#[tokio::test]
async fn test_successful_update_closes_form_and_refreshes() {
    let store = seeded();
    let urls = ObjectUrls::new();
    let mut screen = AdminScreen::with_urls(resolver(), urls.clone());
    screen.activate(&store).await;

    screen.open_edit(&BookId::new("3"));
    screen.set_field(DraftField::Title, "Ulysses (annotated)").unwrap();
    screen.select_file(cover("ulysses.png")).unwrap();
    assert!(screen.save(&store).await);

    assert_eq!(screen.form().mode(), &FormMode::Closed);
    assert_eq!(urls.live_count(), 0);
    let updated = screen.book(&BookId::new("3")).unwrap();
    assert_eq!(updated.title, "Ulysses (annotated)");
    assert_eq!(updated.cover.as_deref(), Some("/uploads/ulysses.png"));
    assert_eq!(store.calls().await.last(), Some(&StoreCall::List));
}

#[tokio::test]
async fn test_add_moby_dick_to_empty_store() {
    let store = MemoryStore::new();
    let mut screen = AdminScreen::new(resolver());
    screen.activate(&store).await;
    assert_eq!(screen.displayed_count(), 0);

    screen.open_new();
    screen.set_field(DraftField::Title, "Moby Dick").unwrap();
    screen.set_field(DraftField::Author, "Melville").unwrap();
    screen.set_field(DraftField::Description, "...").unwrap();
    assert!(screen.save(&store).await);

    let calls = store.calls().await;
    assert!(calls.contains(&StoreCall::Create {
        draft: BookDraft::new("Moby Dick", "Melville", "..."),
        cover: None,
    }));
    assert_eq!(screen.books().len(), 1);
    assert_eq!(screen.books()[0].id, BookId::new("1"));
    assert_eq!(screen.books()[0].title, "Moby Dick");
    assert!(!screen.form().is_open());
}

#[tokio::test]
async fn test_delete_without_confirmation_never_calls_store() {
    let store = seeded();
    let mut screen = AdminScreen::new(resolver());
    screen.activate(&store).await;

    assert!(screen.request_delete(&BookId::new("1")));
    screen.resolve_delete(&store, false).await;

    assert_eq!(store.mutation_count().await, 0);
    assert!(screen.pending_delete().is_none());
    assert_eq!(screen.displayed_count(), 3);
}

#[tokio::test]
async fn test_confirmed_delete_failure_keeps_list_and_shows_error() {
    let store = seeded();
    let mut screen = AdminScreen::new(resolver());
    screen.activate(&store).await;
    let before = screen.books().to_vec();

    store
        .fail_next(Operation::Delete, StoreError::network("HTTP 500"))
        .await;
    screen.request_delete(&BookId::new("1"));
    screen.resolve_delete(&store, true).await;

    assert_eq!(screen.books(), before.as_slice());
    assert_eq!(screen.banner_message().as_deref(), Some("Failed to delete book"));
    assert!(!screen.is_deleting());
}

#[tokio::test]
async fn test_confirmed_delete_refreshes_list() {
    let store = seeded();
    let mut screen = AdminScreen::new(resolver());
    screen.activate(&store).await;

    screen.request_delete(&BookId::new("2"));
    screen.resolve_delete(&store, true).await;

    assert_eq!(screen.displayed_count(), 2);
    assert!(screen.book(&BookId::new("2")).is_none());
    assert_eq!(store.books().await.len(), 2);
}

#[tokio::test]
async fn test_refresh_failure_after_mutation_keeps_last_good_list() {
    let store = seeded();
    let mut screen = AdminScreen::new(resolver());
    screen.activate(&store).await;

    store.delete_book(&BookId::new("3")).await.unwrap();
    store
        .fail_next(Operation::List, StoreError::network("timeout"))
        .await;
    screen.refresh(&store).await;

    assert_eq!(screen.displayed_count(), 3);
    assert!(screen.banner().is_some());
}
