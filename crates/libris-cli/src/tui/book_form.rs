use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use libris_core::model::DraftField;

use super::book_list::centered_rect;
use super::{App, Focus};

/// Render the add/edit form as a popup over the list.
pub fn render(frame: &mut Frame, app: &App, focus: Focus) {
    let area = centered_rect(70, 70, frame.area());
    let form = app.screen.form();

    let mut lines: Vec<Line<'_>> = Vec::new();
    for field in DraftField::ALL {
        let value = form.draft().get(field);
        lines.push(input_line(field.label(), value, focus == Focus::Field(field)));
        lines.push(Line::from(""));
    }
    lines.push(input_line(
        "Cover Image",
        &app.cover_input,
        focus == Focus::CoverPath,
    ));
    if let Some(notice) = &app.cover_notice {
        lines.push(Line::from(Span::styled(
            format!("  {}", notice),
            Style::default().fg(Color::Yellow),
        )));
    }

    let preview = match form.preview() {
        Some(preview) if preview.is_owned() => format!("  Preview: {} (local)", preview.url()),
        Some(preview) => format!("  Preview: {}", preview.url()),
        None => "  Preview: none".to_string(),
    };
    lines.push(Line::from(Span::styled(
        preview,
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    if let Some(error) = app.screen.form_error() {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }

    let submit_style = if app.screen.can_submit() {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(Span::styled(
        format!("  [ {} ]", app.screen.submit_label()),
        submit_style,
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Tab Next  Enter Load cover  Ctrl+S Save  Esc Cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let popup = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(app.screen.form_title())
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn input_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut spans = vec![
        Span::styled(format!("  {:<12}", label), label_style),
        Span::raw(value),
    ];
    if focused {
        spans.push(Span::styled("\u{2588}", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}
