use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

use libris_core::admin::CoverDisplay;

use super::App;

/// Render the book list view.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Banner / status
            Constraint::Min(5),    // Book table
            Constraint::Length(3), // Help bar
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    render_banner(frame, app, chunks[1]);
    render_table(frame, app, chunks[2]);
    render_help(frame, chunks[3]);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let mut text = format!("Books Admin    {} books", app.screen.displayed_count());
    if app.screen.is_loading() {
        text.push_str("    Loading...");
    }
    if app.screen.is_deleting() {
        text.push_str("    Deleting...");
    }
    let title = Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match (app.screen.banner_message(), &app.status) {
        (Some(message), _) => (message, Style::default().fg(Color::Red)),
        (None, Some(status)) => (status.clone(), Style::default().fg(Color::Green)),
        (None, None) => (String::new(), Style::default()),
    };
    let banner = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(banner, area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let books = app.screen.books();

    let header = Row::new(vec![
        Cell::from("#").style(Style::default().fg(Color::DarkGray)),
        Cell::from("Title").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Author"),
        Cell::from("Cover"),
    ])
    .height(1);

    // area.height - 2 for borders - 1 for header
    let viewport_height = (area.height.saturating_sub(3)) as usize;
    let visible_start = app.list_offset;
    let visible_end = (visible_start + viewport_height).min(books.len());

    let rows: Vec<Row> = books
        .iter()
        .enumerate()
        .skip(visible_start)
        .take(viewport_height)
        .map(|(i, book)| {
            let style = if i == app.selected {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            let cover = match app.screen.cover_for(book) {
                CoverDisplay::Image(url) => Cell::from(url),
                CoverDisplay::Placeholder(title) => Cell::from(format!("[{}]", title))
                    .style(Style::default().fg(Color::DarkGray)),
            };
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(book.title.clone()),
                Cell::from(book.author.clone()),
                cover,
            ])
            .style(style)
        })
        .collect();

    let title = if books.len() > viewport_height {
        format!(
            "Books [{}-{} of {}]",
            visible_start + 1,
            visible_end,
            books.len()
        )
    } else {
        "Books".to_string()
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Percentage(40),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(
        "  \u{2191}/k Up  \u{2193}/j Down  a Add  e Edit  d Delete  r Refresh  q Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

/// Render the delete confirmation over the list.
pub fn render_confirm(frame: &mut Frame, app: &App) {
    let Some(book) = app.screen.pending_delete() else {
        return;
    };
    let area = centered_rect(50, 20, frame.area());
    let prompt = Paragraph::new(vec![
        Line::from(format!("Delete \"{}\" by {}?", book.title, book.author)),
        Line::from(""),
        Line::from(Span::styled(
            "y Yes  n No",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Confirm Delete")
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(prompt, area);
}

/// A rectangle of the given percentage size centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
