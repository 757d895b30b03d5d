//! In-memory [`BookStore`] that behaves like the REST backend.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::model::{Book, BookDraft, BookId, CoverFile};
use crate::store::{BookStore, StoreResult};

/// Store operations, for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

/// A call received by the store, as the backend would see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List,
    Create {
        draft: BookDraft,
        cover: Option<String>,
    },
    Update {
        id: BookId,
        draft: BookDraft,
        cover: Option<String>,
    },
    Delete(BookId),
}

#[derive(Debug, Default)]
struct State {
    books: Vec<Book>,
    next_id: u64,
    calls: Vec<StoreCall>,
    failures: HashMap<Operation, StoreError>,
}

/// Books kept in insertion order, with sequential identifiers from `"1"`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records.
    pub fn with_books(books: Vec<Book>) -> Self {
        let next_id = books.len() as u64;
        Self {
            state: Mutex::new(State {
                books,
                next_id,
                ..State::default()
            }),
        }
    }

    /// Make the next call of `operation` fail with `error`.
    pub async fn fail_next(&self, operation: Operation, error: StoreError) {
        self.state.lock().await.failures.insert(operation, error);
    }

    pub async fn books(&self) -> Vec<Book> {
        self.state.lock().await.books.clone()
    }

    pub async fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of calls that would have changed data.
    pub async fn mutation_count(&self) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|call| !matches!(call, StoreCall::List))
            .count()
    }
}

impl State {
    fn take_failure(&mut self, operation: Operation) -> StoreResult<()> {
        match self.failures.remove(&operation) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn upload_path(cover: &CoverFile) -> String {
    format!("/uploads/{}", cover.file_name)
}

fn check_draft(draft: &BookDraft) -> StoreResult<()> {
    if draft.title.trim().is_empty() || draft.author.trim().is_empty() {
        return Err(StoreError::validation("Title and author are required"));
    }
    Ok(())
}

#[async_trait::async_trait]
impl BookStore for MemoryStore {
    async fn list_books(&self) -> StoreResult<Vec<Book>> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::List);
        state.take_failure(Operation::List)?;
        Ok(state.books.clone())
    }

    async fn create_book(&self, draft: &BookDraft, cover: Option<&CoverFile>) -> StoreResult<Book> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Create {
            draft: draft.clone(),
            cover: cover.map(|c| c.file_name.clone()),
        });
        state.take_failure(Operation::Create)?;
        check_draft(draft)?;

        state.next_id += 1;
        let book = Book {
            id: BookId::new(state.next_id.to_string()),
            title: draft.title.clone(),
            author: draft.author.clone(),
            description: draft.description.clone(),
            cover: cover.map(upload_path),
        };
        state.books.push(book.clone());
        Ok(book)
    }

    async fn update_book(
        &self,
        id: &BookId,
        draft: &BookDraft,
        cover: Option<&CoverFile>,
    ) -> StoreResult<Book> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Update {
            id: id.clone(),
            draft: draft.clone(),
            cover: cover.map(|c| c.file_name.clone()),
        });
        state.take_failure(Operation::Update)?;
        check_draft(draft)?;

        let book = state
            .books
            .iter_mut()
            .find(|book| &book.id == id)
            .ok_or_else(|| StoreError::validation("Book not found"))?;
        book.title.clone_from(&draft.title);
        book.author.clone_from(&draft.author);
        book.description.clone_from(&draft.description);
        if let Some(cover) = cover {
            book.cover = Some(upload_path(cover));
        }
        Ok(book.clone())
    }

    async fn delete_book(&self, id: &BookId) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Delete(id.clone()));
        state.take_failure(Operation::Delete)?;

        let before = state.books.len();
        state.books.retain(|book| &book.id != id);
        if state.books.len() == before {
            return Err(StoreError::network("HTTP 404 Not Found"));
        }
        Ok(())
    }
}
