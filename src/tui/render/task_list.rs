use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::{cursor_field_spans, pad_to_width};
use super::push_highlighted_spans;

/// Render the visible tasks, keeping the cursor row on screen
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let visible_height = area.height as usize;
    let width = area.width as usize;

    let visible = app.visible();
    if visible.is_empty() {
        let message = if app.list.tasks().is_empty() {
            " No tasks yet. Press a to add one."
        } else {
            " No matching tasks"
        };
        let empty = Paragraph::new(message).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let cursor = app.cursor.min(visible.len() - 1);
    let scroll = scroll_for_cursor(app.scroll_offset, cursor, visible_height);
    let search_re = app.active_search_re();
    let editing = app.list.edit_session().editing_id();

    let mut lines: Vec<Line> = Vec::with_capacity(visible_height);
    for (i, task) in visible.iter().enumerate().skip(scroll).take(visible_height) {
        let is_cursor = i == cursor && app.mode != Mode::Search && app.mode != Mode::Add;
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };

        let mut spans: Vec<Span> = Vec::new();
        let check_color = if task.completed {
            app.theme.green
        } else {
            app.theme.dim
        };
        spans.push(Span::styled(" ", Style::default().bg(row_bg)));
        spans.push(Span::styled(
            task.checkbox(),
            Style::default().fg(check_color).bg(row_bg),
        ));
        spans.push(Span::styled(" ", Style::default().bg(row_bg)));

        let text_width = width.saturating_sub(unicode::display_width(task.checkbox()) + 3);
        if app.mode == Mode::Edit && editing == Some(task.id) {
            let draft_style = Style::default().fg(app.theme.text_bright).bg(row_bg);
            let cursor_style = Style::default().fg(app.theme.highlight).bg(row_bg);
            spans.extend(cursor_field_spans(
                app.list.edit_session().draft(),
                app.edit_cursor,
                text_width,
                draft_style,
                cursor_style,
            ));
        } else {
            let mut text_style = Style::default().fg(app.theme.text).bg(row_bg);
            if task.completed {
                text_style = text_style
                    .fg(app.theme.dim)
                    .add_modifier(Modifier::CROSSED_OUT);
            } else if is_cursor {
                text_style = text_style
                    .fg(app.theme.text_bright)
                    .add_modifier(Modifier::BOLD);
            }
            let match_style = Style::default()
                .fg(app.theme.search_match_fg)
                .bg(app.theme.search_match_bg);
            let text = unicode::truncate_to_width(&task.text, text_width);
            push_highlighted_spans(&mut spans, &text, text_style, match_style, search_re.as_ref());
        }

        if is_cursor {
            pad_to_width(&mut spans, width, Style::default().bg(row_bg));
        }
        lines.push(Line::from(spans));
    }

    app.scroll_offset = scroll;
    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Adjust `offset` so row `cursor` falls within a window of `height` rows.
fn scroll_for_cursor(offset: usize, cursor: usize, height: usize) -> usize {
    if height == 0 {
        return cursor;
    }
    if cursor < offset {
        cursor
    } else if cursor >= offset + height {
        cursor + 1 - height
    } else {
        offset
    }
}
