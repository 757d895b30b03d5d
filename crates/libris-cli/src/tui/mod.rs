use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use libris_client::LibraryClient;
use libris_core::admin::{perform_save, CoverDisplay};
use libris_core::form::Submission;
use libris_core::model::DraftField;
use libris_core::store::StoreResult;
use libris_core::{AdminScreen, Book, BookId, BookStore, CoverFile, ImageResolver};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedSender};

pub mod book_form;
pub mod book_list;

/// Which form input receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(DraftField),
    /// Path of a local image to use as the cover.
    CoverPath,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Field(DraftField::Title) => Self::Field(DraftField::Author),
            Self::Field(DraftField::Author) => Self::Field(DraftField::Description),
            Self::Field(DraftField::Description) => Self::CoverPath,
            Self::CoverPath => Self::Field(DraftField::Title),
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Field(DraftField::Title) => Self::CoverPath,
            Self::Field(DraftField::Author) => Self::Field(DraftField::Title),
            Self::Field(DraftField::Description) => Self::Field(DraftField::Author),
            Self::CoverPath => Self::Field(DraftField::Description),
        }
    }
}

/// Which view the TUI is currently displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    BookList,
    Form(Focus),
    ConfirmDelete,
}

/// Backend work requested by a key press or an outcome.
#[derive(Debug)]
pub enum Task {
    /// List request carrying its load ticket.
    Load(u64),
    Save(Submission),
    Delete(BookId),
    ProbeCover(BookId, String),
}

/// Result of a [`Task`], sent back to the event loop.
#[derive(Debug)]
pub enum Outcome {
    Loaded(u64, StoreResult<Vec<Book>>),
    Saved(u64, StoreResult<Book>),
    Deleted(BookId, StoreResult<()>),
    CoverChecked(BookId, bool),
}

/// Application state for the books admin TUI.
#[derive(Debug)]
pub struct App {
    pub screen: AdminScreen,
    pub view: View,
    pub selected: usize,
    pub list_offset: usize, // First visible book in the list
    pub cover_input: String,
    /// Problem with the cover path, shown under the cover input.
    pub cover_notice: Option<String>,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(resolver: ImageResolver) -> Self {
        Self {
            screen: AdminScreen::new(resolver),
            view: View::BookList,
            selected: 0,
            list_offset: 0,
            cover_input: String::new(),
            cover_notice: None,
            status: None,
            should_quit: false,
        }
    }

    fn selected_id(&self) -> Option<BookId> {
        self.screen.books().get(self.selected).map(|book| book.id.clone())
    }

    fn start_load(&mut self) -> Task {
        Task::Load(self.screen.begin_load())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Task> {
        self.status = None;
        match self.view {
            View::BookList => self.handle_list_key(key.code),
            View::ConfirmDelete => self.handle_confirm_key(key.code),
            View::Form(focus) => self.handle_form_key(focus, key),
        }
    }

    fn handle_list_key(&mut self, key: KeyCode) -> Option<Task> {
        // Assume reasonable viewport height (will be refined in render)
        const VIEWPORT_HEIGHT: usize = 20;

        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.screen.displayed_count() {
                    self.selected += 1;
                    if self.selected >= self.list_offset + VIEWPORT_HEIGHT {
                        self.list_offset = self.selected - VIEWPORT_HEIGHT + 1;
                    }
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                    if self.selected < self.list_offset {
                        self.list_offset = self.selected;
                    }
                }
            }
            KeyCode::Char('a') => {
                self.screen.open_new();
                self.open_form();
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    if self.screen.open_edit(&id) {
                        self.open_form();
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    if self.screen.request_delete(&id) {
                        self.view = View::ConfirmDelete;
                    }
                }
            }
            KeyCode::Char('r') => {
                if !self.screen.is_loading() {
                    return Some(self.start_load());
                }
            }
            _ => {}
        }
        None
    }

    fn handle_confirm_key(&mut self, key: KeyCode) -> Option<Task> {
        match key {
            KeyCode::Char('y' | 'Y') => {
                self.view = View::BookList;
                let task = self.screen.confirm_delete().map(Task::Delete);
                if task.is_none() {
                    self.screen.cancel_delete();
                    self.status = Some("A delete is already in progress".to_string());
                }
                task
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                self.screen.cancel_delete();
                self.view = View::BookList;
                None
            }
            _ => None,
        }
    }

    fn handle_form_key(&mut self, focus: Focus, key: KeyEvent) -> Option<Task> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('s') {
                return self.screen.begin_save().map(Task::Save);
            }
            return None;
        }

        match key.code {
            KeyCode::Esc => {
                self.screen.cancel_form();
                self.view = View::BookList;
            }
            KeyCode::Tab => self.view = View::Form(focus.next()),
            KeyCode::BackTab => self.view = View::Form(focus.prev()),
            KeyCode::Enter => match focus {
                Focus::CoverPath => self.load_cover(),
                Focus::Field(_) => self.view = View::Form(focus.next()),
            },
            KeyCode::Backspace => {
                if let Some(text) = self.input_mut(focus) {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.input_mut(focus) {
                    text.push(c);
                }
            }
            _ => {}
        }
        None
    }

    fn open_form(&mut self) {
        self.cover_input.clear();
        self.cover_notice = None;
        self.view = View::Form(Focus::Field(DraftField::Title));
    }

    fn input_mut(&mut self, focus: Focus) -> Option<&mut String> {
        match focus {
            Focus::Field(field) => self.screen.field_mut(field),
            Focus::CoverPath => {
                self.cover_notice = None;
                Some(&mut self.cover_input)
            }
        }
    }

    fn load_cover(&mut self) {
        let path = self.cover_input.trim();
        if path.is_empty() {
            return;
        }
        let selected = CoverFile::open(Path::new(path))
            .and_then(|file| self.screen.select_file(file).map(|_| ()));
        self.cover_notice = selected.err().map(|err| err.to_string());
    }

    /// Apply a finished task. Returns any follow-up work.
    fn apply(&mut self, outcome: Outcome) -> Vec<Task> {
        match outcome {
            Outcome::Loaded(ticket, result) => {
                let loaded = result.is_ok();
                self.screen.finish_load(ticket, result);
                let count = self.screen.displayed_count();
                if self.selected >= count {
                    self.selected = count.saturating_sub(1);
                }
                self.list_offset = self.list_offset.min(self.selected);
                if !loaded {
                    return Vec::new();
                }
                self.screen
                    .books()
                    .iter()
                    .filter_map(|book| match self.screen.cover_for(book) {
                        CoverDisplay::Image(url) => Some(Task::ProbeCover(book.id.clone(), url)),
                        CoverDisplay::Placeholder(_) => None,
                    })
                    .collect()
            }
            Outcome::Saved(session, result) => {
                let refresh = self.screen.finish_save(session, result);
                if matches!(self.view, View::Form(_)) && !self.screen.form().is_open() {
                    self.view = View::BookList;
                    self.status = Some("Book saved".to_string());
                }
                if refresh {
                    vec![self.start_load()]
                } else {
                    Vec::new()
                }
            }
            Outcome::Deleted(id, result) => {
                if self.screen.finish_delete(result) {
                    self.status = Some(format!("Deleted book {}", id));
                    vec![self.start_load()]
                } else {
                    Vec::new()
                }
            }
            Outcome::CoverChecked(id, loads) => {
                if !loads {
                    self.screen.mark_cover_failed(&id);
                }
                Vec::new()
            }
        }
    }
}

/// Run a task on the runtime and report back over `tx`.
fn spawn(task: Task, client: &Arc<LibraryClient>, tx: &UnboundedSender<Outcome>) {
    let client = Arc::clone(client);
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = match task {
            Task::Load(ticket) => Outcome::Loaded(ticket, client.list_books().await),
            Task::Save(submission) => {
                let result = perform_save(client.as_ref(), &submission).await;
                Outcome::Saved(submission.session, result)
            }
            Task::Delete(id) => {
                let result = client.delete_book(&id).await;
                Outcome::Deleted(id, result)
            }
            Task::ProbeCover(id, url) => {
                let loads = client.probe_image(&url).await;
                Outcome::CoverChecked(id, loads)
            }
        };
        if tx.send(outcome).is_err() {
            log::debug!("Dropping task outcome after the admin screen closed");
        }
    });
}

/// Run the books admin TUI.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// on exit (including on error).
pub async fn run_tui(client: LibraryClient) -> Result<()> {
    let client = Arc::new(client);
    let app = App::new(client.resolver());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the event loop, capturing any error so we can restore the terminal
    let result = run_event_loop(&mut terminal, app, &client).await;

    // Restore terminal regardless of success or failure
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    client: &Arc<LibraryClient>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let initial = app.start_load();
    spawn(initial, client, &tx);

    loop {
        terminal.draw(|frame| {
            book_list::render(frame, &app);
            match app.view {
                View::BookList => {}
                View::ConfirmDelete => book_list::render_confirm(frame, &app),
                View::Form(focus) => book_form::render(frame, &app, focus),
            }
        })?;

        while let Ok(outcome) = rx.try_recv() {
            for task in app.apply(outcome) {
                spawn(task, client, &tx);
            }
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(task) = app.handle_key(key) {
                        spawn(task, client, &tx);
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
