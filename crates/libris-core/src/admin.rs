//! Books admin screen: list, modal form, delete confirmation.
//!
//! The screen never talks to the network itself. Each flow is split into a
//! `begin_*` call that returns the request to perform and a `finish_*` call
//! that applies the outcome, so an event loop can run requests on background
//! tasks. [`AdminScreen::activate`], [`AdminScreen::save`] and
//! [`AdminScreen::resolve_delete`] run a whole flow inline.

use std::collections::HashSet;

use crate::error::ScreenError;
use crate::form::{FormController, FormMode, SaveTarget, Submission};
use crate::image::{ImageRef, ImageResolver};
use crate::model::{Book, BookId, CoverFile, DraftField};
use crate::preview::{ObjectUrls, Preview};
use crate::store::{BookStore, StoreResult};

/// How a book card shows its cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverDisplay<'a> {
    Image(String),
    /// Textual placeholder carrying the book title.
    Placeholder(&'a str),
}

/// State of the books admin screen.
#[derive(Debug)]
pub struct AdminScreen {
    resolver: ImageResolver,
    books: Vec<Book>,
    /// Ticket of the most recently started list request.
    load_issued: u64,
    /// Newest ticket whose response has been applied.
    load_applied: u64,
    banner: Option<ScreenError>,
    form: FormController,
    form_error: Option<String>,
    saving: bool,
    deleting: bool,
    pending_delete: Option<BookId>,
    failed_covers: HashSet<BookId>,
}

impl AdminScreen {
    pub fn new(resolver: ImageResolver) -> Self {
        Self::with_urls(resolver, ObjectUrls::new())
    }

    pub fn with_urls(resolver: ImageResolver, urls: ObjectUrls) -> Self {
        Self {
            resolver,
            books: Vec::new(),
            load_issued: 0,
            load_applied: 0,
            banner: None,
            form: FormController::new(urls),
            form_error: None,
            saving: false,
            deleting: false,
            pending_delete: None,
            failed_covers: HashSet::new(),
        }
    }

    // -- Read access -------------------------------------------------------

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn displayed_count(&self) -> usize {
        self.books.len()
    }

    pub fn book(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|book| &book.id == id)
    }

    /// True until the newest list request has resolved.
    pub fn is_loading(&self) -> bool {
        self.load_applied < self.load_issued
    }

    pub fn banner(&self) -> Option<&ScreenError> {
        self.banner.as_ref()
    }

    pub fn banner_message(&self) -> Option<String> {
        self.banner.as_ref().map(ScreenError::display_message)
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Inline error shown inside the open form.
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn form_title(&self) -> &'static str {
        match self.form.mode() {
            FormMode::EditingExisting(_) => "Edit Book",
            FormMode::CreatingNew | FormMode::Closed => "Add New Book",
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// The submit control is enabled only while the form is open and idle.
    pub fn can_submit(&self) -> bool {
        self.form.is_open() && !self.saving
    }

    pub fn submit_label(&self) -> &'static str {
        if self.saving {
            "Saving..."
        } else {
            "Save Book"
        }
    }

    pub fn resolver(&self) -> &ImageResolver {
        &self.resolver
    }

    // -- Loading -----------------------------------------------------------

    /// Start a list request. Pass the returned ticket to [`Self::finish_load`].
    pub fn begin_load(&mut self) -> u64 {
        self.load_issued += 1;
        self.load_issued
    }

    /// Apply the list response for `ticket`. Failures keep whatever list was
    /// last loaded. A response older than one already applied is dropped, so
    /// overlapping refreshes cannot bring back a stale list.
    pub fn finish_load(&mut self, ticket: u64, result: StoreResult<Vec<Book>>) {
        if ticket <= self.load_applied {
            log::debug!(
                "Dropping stale book list (request {}, already applied {})",
                ticket,
                self.load_applied
            );
            return;
        }
        self.load_applied = ticket;
        match result {
            Ok(books) => {
                log::debug!("Loaded {} books", books.len());
                self.books = books;
                self.banner = None;
                self.failed_covers.clear();
            }
            Err(err) => {
                log::warn!("Failed to load books: {}", err);
                self.banner = Some(ScreenError::LoadFailure(err));
            }
        }
    }

    /// Fetch the book list on entry to the screen.
    pub async fn activate<S: BookStore + ?Sized>(&mut self, store: &S) {
        self.refresh(store).await;
    }

    pub async fn refresh<S: BookStore + ?Sized>(&mut self, store: &S) {
        let ticket = self.begin_load();
        let result = store.list_books().await;
        self.finish_load(ticket, result);
    }

    // -- Form --------------------------------------------------------------

    pub fn open_new(&mut self) {
        self.form_error = None;
        self.form.open_new();
    }

    /// Open the form on a listed book. Returns `false` if it is not listed.
    pub fn open_edit(&mut self, id: &BookId) -> bool {
        let Some(book) = self.books.iter().find(|book| &book.id == id) else {
            return false;
        };
        self.form_error = None;
        self.form.open_edit(book, &self.resolver);
        true
    }

    pub fn cancel_form(&mut self) {
        self.form_error = None;
        self.form.close();
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) -> crate::Result<()> {
        self.form.set_field(field, value)
    }

    pub fn field_mut(&mut self, field: DraftField) -> Option<&mut String> {
        self.form.field_mut(field)
    }

    pub fn select_file(&mut self, file: CoverFile) -> crate::Result<&Preview> {
        self.form.select_file(file)
    }

    // -- Saving ------------------------------------------------------------

    /// Take a snapshot of the form to send to the store.
    ///
    /// Returns `None` while a save is already in flight, when the form is
    /// closed, or when the draft fails local validation (the reason is shown
    /// inline).
    pub fn begin_save(&mut self) -> Option<Submission> {
        if self.saving {
            log::debug!("Ignoring submit while a save is in flight");
            return None;
        }
        let submission = self.form.submission()?;
        if let Err(err) = submission.draft.validate() {
            self.form_error = Some(match err {
                crate::Error::InvalidData(message) => message,
                other => other.to_string(),
            });
            return None;
        }
        self.saving = true;
        self.form_error = None;
        Some(submission)
    }

    /// Apply the outcome of a save started in form session `session`.
    ///
    /// Returns `true` when the list should be refreshed. A save that
    /// completes after its form was closed still asks for a refresh, but
    /// never closes a form the operator opened since.
    pub fn finish_save(&mut self, session: u64, result: StoreResult<Book>) -> bool {
        self.saving = false;
        let same_form = self.form.is_open() && self.form.session() == session;
        match result {
            Ok(book) => {
                log::info!("Saved book {} ({})", book.id, book.title);
                if same_form {
                    self.form_error = None;
                    self.form.close();
                }
                true
            }
            Err(err) => {
                log::warn!("Failed to save book: {}", err);
                let err = ScreenError::Save(err);
                if same_form {
                    self.form_error = Some(err.display_message());
                } else {
                    self.banner = Some(err);
                }
                false
            }
        }
    }

    /// Submit the form and, on success, reload the list.
    ///
    /// Returns `true` if the store accepted the save.
    pub async fn save<S: BookStore + ?Sized>(&mut self, store: &S) -> bool {
        let Some(submission) = self.begin_save() else {
            return false;
        };
        let result = perform_save(store, &submission).await;
        let saved = self.finish_save(submission.session, result);
        if saved {
            self.refresh(store).await;
        }
        saved
    }

    // -- Deleting ----------------------------------------------------------

    /// Ask the operator to confirm deleting a listed book.
    pub fn request_delete(&mut self, id: &BookId) -> bool {
        if self.book(id).is_none() {
            return false;
        }
        self.pending_delete = Some(id.clone());
        true
    }

    /// The book awaiting a yes/no answer.
    pub fn pending_delete(&self) -> Option<&Book> {
        self.pending_delete.as_ref().and_then(|id| self.book(id))
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The operator said yes: returns the id to delete, unless another
    /// delete is still in flight.
    pub fn confirm_delete(&mut self) -> Option<BookId> {
        if self.deleting {
            log::debug!("Ignoring delete while another delete is in flight");
            return None;
        }
        let id = self.pending_delete.take()?;
        self.deleting = true;
        Some(id)
    }

    /// Apply a delete outcome. Returns `true` when the list should be refreshed.
    pub fn finish_delete(&mut self, result: StoreResult<()>) -> bool {
        self.deleting = false;
        match result {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Failed to delete book: {}", err);
                self.banner = Some(ScreenError::Delete(err));
                false
            }
        }
    }

    /// Answer the pending confirmation and carry out the delete if `confirmed`.
    pub async fn resolve_delete<S: BookStore + ?Sized>(&mut self, store: &S, confirmed: bool) {
        if !confirmed {
            self.cancel_delete();
            return;
        }
        let Some(id) = self.confirm_delete() else {
            return;
        };
        let result = store.delete_book(&id).await;
        if self.finish_delete(result) {
            log::info!("Deleted book {}", id);
            self.refresh(store).await;
        }
    }

    // -- Covers ------------------------------------------------------------

    pub fn cover_for<'a>(&self, book: &'a Book) -> CoverDisplay<'a> {
        if self.failed_covers.contains(&book.id) {
            return CoverDisplay::Placeholder(&book.title);
        }
        match self.resolver.resolve(book.cover.as_deref()) {
            ImageRef::Hosted(url) => CoverDisplay::Image(url),
            ImageRef::Missing => CoverDisplay::Placeholder(&book.title),
        }
    }

    /// Record that a cover failed to load. It stays a placeholder until the
    /// next list response.
    pub fn mark_cover_failed(&mut self, id: &BookId) {
        self.failed_covers.insert(id.clone());
    }
}

/// Send a submission to the store.
pub async fn perform_save<S: BookStore + ?Sized>(
    store: &S,
    submission: &Submission,
) -> StoreResult<Book> {
    let cover = submission.file.as_deref();
    match &submission.target {
        SaveTarget::Create => store.create_book(&submission.draft, cover).await,
        SaveTarget::Update(id) => store.update_book(id, &submission.draft, cover).await,
    }
}
