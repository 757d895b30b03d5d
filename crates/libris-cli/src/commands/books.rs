use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use libris_client::LibraryClient;
use libris_core::admin::CoverDisplay;
use libris_core::model::DraftField;
use libris_core::{AdminScreen, BookId, CoverFile, ScreenError};

/// Field values given on the command line for `books edit`.
#[derive(Debug, Default)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub cover: Option<PathBuf>,
}

async fn load_screen(client: &LibraryClient) -> Result<AdminScreen> {
    let mut screen = AdminScreen::new(client.resolver());
    screen.activate(client).await;
    if let Some(message) = screen.banner_message() {
        anyhow::bail!("{}", message);
    }
    Ok(screen)
}

fn attach_cover(screen: &mut AdminScreen, path: Option<PathBuf>) -> Result<()> {
    if let Some(path) = path {
        let cover = CoverFile::open(&path)
            .with_context(|| format!("Failed to read cover image {}", path.display()))?;
        println!("  Cover: {} ({} bytes)", cover.file_name, cover.len());
        screen.select_file(cover)?;
    }
    Ok(())
}

/// Save the open form, turning an inline or banner error into a failure.
async fn save(screen: &mut AdminScreen, client: &LibraryClient) -> Result<()> {
    if screen.save(client).await {
        return Ok(());
    }
    let message = screen
        .form_error()
        .map(str::to_string)
        .or_else(|| screen.banner_message())
        .unwrap_or_else(|| "Failed to save book".to_string());
    anyhow::bail!("{}", message)
}

/// Check the screen after a save or delete and its follow-up reload.
///
/// A failed mutation is an error. A failed reload is not, since the record
/// was already written; it yields `None` in place of the book count.
fn mutation_outcome(screen: &AdminScreen) -> Result<Option<usize>> {
    match screen.banner() {
        Some(ScreenError::LoadFailure(err)) => {
            log::warn!("Reloading the book list failed: {}", err);
            Ok(None)
        }
        Some(err) => anyhow::bail!("{}", err.display_message()),
        None => Ok(Some(screen.displayed_count())),
    }
}

fn print_count(count: Option<usize>) {
    match count {
        Some(count) => println!("  The catalogue now has {} books.", count),
        None => println!("  Could not reload the book list; run 'libris books list' to check."),
    }
}

pub async fn list_books(client: &LibraryClient, check_covers: bool) -> Result<()> {
    let mut screen = load_screen(client).await?;

    if check_covers {
        let hosted: Vec<(BookId, String)> = screen
            .books()
            .iter()
            .filter_map(|book| match screen.cover_for(book) {
                CoverDisplay::Image(url) => Some((book.id.clone(), url)),
                CoverDisplay::Placeholder(_) => None,
            })
            .collect();
        for (id, url) in hosted {
            if !client.probe_image(&url).await {
                screen.mark_cover_failed(&id);
            }
        }
    }

    println!("\n📚 Library Books ({})\n", screen.displayed_count());

    if screen.books().is_empty() {
        println!("  No books in the catalogue yet.");
        println!("\n  Run `libris books add --title ... --author ...` to add one");
        return Ok(());
    }

    for book in screen.books() {
        println!("  [{}] {}", book.id, book.title);
        println!("      by {}", book.author);
        match screen.cover_for(book) {
            CoverDisplay::Image(url) => println!("      Cover: {}", url),
            CoverDisplay::Placeholder(title) => println!("      Cover: [no image: {}]", title),
        }
        if !book.description.is_empty() {
            println!("      {}", book.description);
        }
        println!();
    }

    Ok(())
}

pub async fn add_book(
    client: &LibraryClient,
    title: String,
    author: String,
    description: String,
    cover: Option<PathBuf>,
) -> Result<()> {
    let mut screen = AdminScreen::new(client.resolver());
    screen.open_new();
    screen.set_field(DraftField::Title, title)?;
    screen.set_field(DraftField::Author, author)?;
    screen.set_field(DraftField::Description, description)?;
    attach_cover(&mut screen, cover)?;

    save(&mut screen, client).await?;
    let count = mutation_outcome(&screen)?;

    println!("✓ Saved book.");
    print_count(count);
    Ok(())
}

pub async fn edit_book(client: &LibraryClient, id: &str, changes: BookChanges) -> Result<()> {
    let mut screen = load_screen(client).await?;
    let id = BookId::new(id);

    if !screen.open_edit(&id) {
        anyhow::bail!("No book with id {}", id);
    }

    let fields = [
        (DraftField::Title, changes.title),
        (DraftField::Author, changes.author),
        (DraftField::Description, changes.description),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            screen.set_field(field, value)?;
        }
    }
    attach_cover(&mut screen, changes.cover)?;

    save(&mut screen, client).await?;
    let count = mutation_outcome(&screen)?;

    if let (Some(book), Some(_)) = (screen.book(&id), count) {
        println!("✓ Updated [{}] {} by {}", book.id, book.title, book.author);
    } else {
        println!("✓ Updated book {}", id);
    }
    Ok(())
}

fn prompt_confirmation(title: &str) -> Result<bool> {
    print!("Are you sure you want to delete \"{}\"? [y/N] ", title);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

pub async fn delete_book(client: &LibraryClient, id: &str, yes: bool) -> Result<()> {
    let mut screen = load_screen(client).await?;
    let id = BookId::new(id);

    if !screen.request_delete(&id) {
        anyhow::bail!("No book with id {}", id);
    }

    let title = screen
        .pending_delete()
        .map(|book| book.title.clone())
        .unwrap_or_default();
    let confirmed = yes || prompt_confirmation(&title)?;

    screen.resolve_delete(client, confirmed).await;

    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }
    let count = mutation_outcome(&screen)?;

    println!("✓ Deleted \"{}\".", title);
    print_count(count);
    Ok(())
}
