//! Form state for creating and editing books.
//!
//! ```text
//! Closed ──open_new──▶ CreatingNew ──┐
//!   ▲  └──open_edit──▶ EditingExisting(id)
//!   └────────close (cancel / saved)──┘
//! ```
//!
//! Every transition out of an open state releases a locally owned preview.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::image::{ImageRef, ImageResolver};
use crate::model::{Book, BookDraft, BookId, CoverFile, DraftField};
use crate::preview::{ObjectUrls, Preview};

/// Which record, if any, the form is working on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    CreatingNew,
    EditingExisting(BookId),
}

/// What a submission should do at the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    Create,
    Update(BookId),
}

/// A snapshot of the form handed to the store.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Form session the snapshot was taken from.
    pub session: u64,
    pub target: SaveTarget,
    pub draft: BookDraft,
    pub file: Option<Arc<CoverFile>>,
}

/// Holds the single active draft, its pending file, and its preview.
#[derive(Debug)]
pub struct FormController {
    mode: FormMode,
    draft: BookDraft,
    file: Option<Arc<CoverFile>>,
    preview: Option<Preview>,
    urls: ObjectUrls,
    session: u64,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(ObjectUrls::new())
    }
}

impl FormController {
    pub fn new(urls: ObjectUrls) -> Self {
        Self {
            mode: FormMode::Closed,
            draft: BookDraft::default(),
            file: None,
            preview: None,
            urls,
            session: 0,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    pub fn pending_file(&self) -> Option<&CoverFile> {
        self.file.as_deref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn urls(&self) -> &ObjectUrls {
        &self.urls
    }

    /// Increments every time the form is opened.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Start a new, empty draft.
    pub fn open_new(&mut self) {
        self.close();
        self.session += 1;
        self.mode = FormMode::CreatingNew;
    }

    /// Start editing `book`, previewing its stored cover.
    pub fn open_edit(&mut self, book: &Book, resolver: &ImageResolver) {
        self.close();
        self.session += 1;
        self.mode = FormMode::EditingExisting(book.id.clone());
        self.draft = BookDraft::from_book(book);
        self.preview = match resolver.resolve(book.cover.as_deref()) {
            ImageRef::Hosted(url) => Some(Preview::Hosted(url)),
            ImageRef::Missing => None,
        };
    }

    /// Discard the draft and release any owned preview.
    pub fn close(&mut self) {
        self.release_preview();
        self.mode = FormMode::Closed;
        self.draft = BookDraft::default();
        self.file = None;
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) -> Result<()> {
        self.ensure_open()?;
        self.draft.set(field, value);
        Ok(())
    }

    /// Mutable access to one text field while the form is open.
    pub fn field_mut(&mut self, field: DraftField) -> Option<&mut String> {
        self.is_open().then(|| self.draft.field_mut(field))
    }

    /// Replace the pending file and point the preview at it.
    pub fn select_file(&mut self, file: CoverFile) -> Result<&Preview> {
        self.ensure_open()?;
        let file = Arc::new(file);
        let url = self.urls.create(Arc::clone(&file));
        self.release_preview();
        self.file = Some(file);
        let preview: &Preview = self.preview.insert(Preview::Transient(url));
        Ok(preview)
    }

    /// Snapshot the form for saving; `None` when closed.
    pub fn submission(&self) -> Option<Submission> {
        let target = match &self.mode {
            FormMode::Closed => return None,
            FormMode::CreatingNew => SaveTarget::Create,
            FormMode::EditingExisting(id) => SaveTarget::Update(id.clone()),
        };
        Some(Submission {
            session: self.session,
            target,
            draft: self.draft.clone(),
            file: self.file.clone(),
        })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(Error::InvalidData("the book form is closed".to_string()))
        }
    }

    fn release_preview(&mut self) {
        if let Some(Preview::Transient(url)) = self.preview.take() {
            self.urls.revoke(url);
        }
    }
}

impl Drop for FormController {
    fn drop(&mut self) {
        self.release_preview();
    }
}
