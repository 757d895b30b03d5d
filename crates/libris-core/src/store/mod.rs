//! The seam between screens and the remote book store.

use std::sync::Arc;

use crate::error::StoreError;
use crate::model::{Book, BookDraft, BookId, CoverFile};

pub mod memory;

pub use memory::{MemoryStore, Operation, StoreCall};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// List/create/update/delete over book records.
///
/// Create and update send the draft's text fields plus an optional cover
/// file. Updating without a file keeps the cover already stored.
#[async_trait::async_trait]
pub trait BookStore: Send + Sync {
    async fn list_books(&self) -> StoreResult<Vec<Book>>;

    async fn create_book(&self, draft: &BookDraft, cover: Option<&CoverFile>) -> StoreResult<Book>;

    async fn update_book(
        &self,
        id: &BookId,
        draft: &BookDraft,
        cover: Option<&CoverFile>,
    ) -> StoreResult<Book>;

    /// Callers must have the operator's confirmation before calling this.
    async fn delete_book(&self, id: &BookId) -> StoreResult<()>;
}

#[async_trait::async_trait]
impl<T: BookStore + ?Sized> BookStore for Arc<T> {
    async fn list_books(&self) -> StoreResult<Vec<Book>> {
        (**self).list_books().await
    }

    async fn create_book(&self, draft: &BookDraft, cover: Option<&CoverFile>) -> StoreResult<Book> {
        (**self).create_book(draft, cover).await
    }

    async fn update_book(
        &self,
        id: &BookId,
        draft: &BookDraft,
        cover: Option<&CoverFile>,
    ) -> StoreResult<Book> {
        (**self).update_book(id, draft, cover).await
    }

    async fn delete_book(&self, id: &BookId) -> StoreResult<()> {
        (**self).delete_book(id).await
    }
}
