use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if let Some(status) = &app.status {
        let color = if status.is_error {
            app.theme.red
        } else {
            app.theme.text
        };
        spans.push(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(color).bg(bg),
        ));
    } else {
        spans.push(Span::styled(
            mode_label(app.mode),
            Style::default().fg(app.theme.purple).bg(bg),
        ));
    }

    let hint = mode_hint(app.mode);
    if app.show_key_hints {
        let content_width = spans_width(&spans);
        let hint_width = hint.chars().count();
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => "",
        Mode::Search => " SEARCH",
        Mode::Add => " ADD",
        Mode::Edit => " EDIT",
    }
}

fn mode_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => "a add  / search  e edit  x toggle  d delete  ? help",
        Mode::Search => "Enter done  Esc clear",
        Mode::Add => "Enter add  Esc close",
        Mode::Edit => "Enter save  Esc cancel",
    }
}
