pub mod help_overlay;
pub mod inputs;
pub mod status_row;
pub mod tab_bar;
pub mod task_list;

mod helpers;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::App;

/// Main render function: lays out the screen and dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | search | add | list | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Length(1), // search input
            Constraint::Length(1), // new-task input
            Constraint::Length(1), // spacer
            Constraint::Min(1),    // task list
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);
    inputs::render_search_input(frame, app, chunks[1]);
    inputs::render_add_input(frame, app, chunks[2]);
    task_list::render_task_list(frame, app, chunks[4]);
    status_row::render_status_row(frame, app, chunks[5]);

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::{TERM_H, TERM_W, app_with_tasks, render_to_string};
    use super::*;
    use pretty_assertions::assert_eq;

    fn contents(spans: &[Span]) -> Vec<String> {
        spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn highlight_splits_on_matches() {
        let re = Regex::new("(?i)milk").unwrap();
        let mut spans = Vec::new();
        push_highlighted_spans(
            &mut spans,
            "Milk and milk tea",
            Style::default(),
            Style::default(),
            Some(&re),
        );
        assert_eq!(contents(&spans), vec!["Milk", " and ", "milk", " tea"]);
    }

    #[test]
    fn highlight_without_regex_is_one_span() {
        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, "walk dog", Style::default(), Style::default(), None);
        assert_eq!(contents(&spans), vec!["walk dog"]);
    }

    #[test]
    fn full_screen_layout() {
        let mut app = app_with_tasks(&["buy milk", "walk dog"]);
        let first = app.list.tasks()[0].id;
        app.list.toggle_completed(first).unwrap();

        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("All (2)"));
        assert!(lines[0].contains("Pending (1)"));
        assert!(lines[0].contains("Completed (1)"));
        assert!(lines[2].contains("Search tasks..."));
        assert!(lines[3].contains("Add a new task..."));
        assert!(lines[5].contains("[x] buy milk"));
        assert!(lines[6].contains("[ ] walk dog"));
    }

    #[test]
    fn help_overlay_draws_on_top() {
        let mut app = app_with_tasks(&["buy milk"]);
        app.show_help = true;
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(out.contains("Key Bindings"));
    }
}
