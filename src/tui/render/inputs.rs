use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::{cursor_field_spans, pad_to_width};

const SEARCH_PLACEHOLDER: &str = "Search tasks...";
const ADD_PLACEHOLDER: &str = "Add a new task...";

pub fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.mode == Mode::Search;
    render_input(
        frame,
        app,
        area,
        " / ",
        &app.search_input,
        app.search_cursor,
        SEARCH_PLACEHOLDER,
        focused,
    );
}

pub fn render_add_input(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.mode == Mode::Add;
    render_input(
        frame,
        app,
        area,
        " + ",
        &app.add_input,
        app.add_cursor,
        ADD_PLACEHOLDER,
        focused,
    );
}

#[allow(clippy::too_many_arguments)]
fn render_input(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    label: &'static str,
    text: &str,
    cursor: usize,
    placeholder: &'static str,
    focused: bool,
) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let label_color = if focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };

    let mut spans: Vec<Span> = vec![Span::styled(label, Style::default().fg(label_color).bg(bg))];
    let field_width = width.saturating_sub(unicode::display_width(label) + 1);
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    if focused {
        let cursor_style = Style::default().fg(app.theme.highlight).bg(bg);
        spans.extend(cursor_field_spans(
            text,
            cursor,
            field_width,
            text_style,
            cursor_style,
        ));
        if text.is_empty() {
            spans.push(Span::styled(placeholder, dim_style));
        }
    } else if text.is_empty() {
        spans.push(Span::styled(placeholder, dim_style));
    } else {
        spans.push(Span::styled(
            unicode::truncate_to_width(text, field_width),
            Style::default().fg(app.theme.text).bg(bg),
        ));
    }
    pad_to_width(&mut spans, width, Style::default().bg(bg));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{app_with_tasks, render_to_string};
    use pretty_assertions::assert_eq;

    #[test]
    fn placeholders_when_empty() {
        let app = app_with_tasks(&[]);
        let out = render_to_string(40, 1, |frame, area| render_search_input(frame, &app, area));
        assert_eq!(out, " / Search tasks...");
        let out = render_to_string(40, 1, |frame, area| render_add_input(frame, &app, area));
        assert_eq!(out, " + Add a new task...");
    }

    #[test]
    fn focused_input_shows_cursor() {
        let mut app = app_with_tasks(&[]);
        app.mode = Mode::Add;
        app.add_input = "buy milk".into();
        app.add_cursor = 3;
        let out = render_to_string(40, 1, |frame, area| render_add_input(frame, &app, area));
        assert_eq!(out, " + buy\u{258C} milk");
    }

    #[test]
    fn unfocused_search_keeps_term_visible() {
        let mut app = app_with_tasks(&[]);
        app.search_input = "milk".into();
        let out = render_to_string(40, 1, |frame, area| render_search_input(frame, &app, area));
        assert_eq!(out, " / milk");
    }
}
