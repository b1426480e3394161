use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::filter::Tab;
use crate::tui::app::App;

use super::helpers::spans_width;

/// Render the tab bar: one tab per filter with its count, separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg = app.theme.background;
    let counts = app.list.counts();
    let active = app.active_tab();

    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    // Leading icon
    spans.push(Span::styled(" ", Style::default().bg(bg)));
    spans.push(Span::styled(
        "\u{25B6}",
        Style::default().fg(app.theme.purple).bg(bg),
    ));
    spans.push(Span::styled(" ", Style::default().bg(bg)));

    for tab in Tab::ALL {
        let is_current = tab == active;
        let style = tab_style(app, is_current);
        let tab_bg = if is_current { app.theme.selection_bg } else { bg };

        spans.push(Span::styled(format!(" {} ", tab.label()), style));
        spans.push(Span::styled(
            format!("({})", counts.for_tab(tab)),
            Style::default().fg(app.theme.tab_color(tab)).bg(tab_bg),
        ));
        spans.push(Span::styled(" ", style));
        sep_cols.push(spans_width(&spans));
        spans.push(sep.clone());
    }

    let tabs = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(tabs, area);
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let line: String = (0..width)
        .map(|col| {
            if sep_cols.contains(&col) {
                '\u{2534}'
            } else {
                '\u{2500}'
            }
        })
        .collect();
    let sep_widget =
        Paragraph::new(line).style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(sep_widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{app_with_tasks, render_to_string};
    use pretty_assertions::assert_eq;

    #[test]
    fn tabs_show_counts() {
        let mut app = app_with_tasks(&["a", "b", "c"]);
        let b = app.list.tasks()[1].id;
        app.list.toggle_completed(b).unwrap();

        let out = render_to_string(60, 2, |frame, area| render_tab_bar(frame, &app, area));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[0],
            " \u{25B6}  All (3) \u{2502} Pending (2) \u{2502} Completed (1) \u{2502}"
        );
        assert!(lines[1].starts_with("\u{2500}"));
        assert!(lines[1].contains('\u{2534}'));
    }

    #[test]
    fn current_tab_is_highlighted() {
        let mut app = app_with_tasks(&["a"]);
        app.set_tab(Tab::Pending);

        let backend = ratatui::backend::TestBackend::new(60, 2);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_tab_bar(frame, &app, frame.area()))
            .unwrap();
        let buf = terminal.backend().buffer();

        // " ▶  All (1) │ Pending (1) │": 'P' of Pending sits at column 14
        let cell = &buf[(14, 0)];
        assert_eq!(cell.symbol(), "P");
        assert_eq!(cell.bg, app.theme.selection_bg);
        assert_eq!(buf[(5, 0)].bg, app.theme.background);
    }
}
