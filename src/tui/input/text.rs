use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode::{
    next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left, word_boundary_right,
};

/// Apply a line-editing key to `buf`. Returns true if the text changed.
///
/// `cursor` is a byte offset kept on a grapheme boundary. Keys that
/// are not editing keys (Enter, Esc, Tab...) are left to the caller.
pub fn apply_text_key(buf: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    *cursor = (*cursor).min(buf.len());
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('w') if ctrl => {
            let start = word_boundary_left(buf, *cursor);
            if start == *cursor {
                return false;
            }
            buf.replace_range(start..*cursor, "");
            *cursor = start;
            true
        }
        KeyCode::Char('u') if ctrl => {
            if *cursor == 0 {
                return false;
            }
            buf.replace_range(..*cursor, "");
            *cursor = 0;
            true
        }
        KeyCode::Char('a') if ctrl => {
            *cursor = 0;
            false
        }
        KeyCode::Char('e') if ctrl => {
            *cursor = buf.len();
            false
        }
        KeyCode::Char(c) if !ctrl => {
            buf.insert(*cursor, c);
            *cursor += c.len_utf8();
            true
        }
        KeyCode::Backspace => match prev_grapheme_boundary(buf, *cursor) {
            Some(prev) => {
                buf.replace_range(prev..*cursor, "");
                *cursor = prev;
                true
            }
            None => false,
        },
        KeyCode::Delete => match next_grapheme_boundary(buf, *cursor) {
            Some(next) => {
                buf.replace_range(*cursor..next, "");
                true
            }
            None => false,
        },
        KeyCode::Left if alt => {
            *cursor = word_boundary_left(buf, *cursor);
            false
        }
        KeyCode::Right if alt => {
            *cursor = word_boundary_right(buf, *cursor);
            false
        }
        KeyCode::Left => {
            if let Some(prev) = prev_grapheme_boundary(buf, *cursor) {
                *cursor = prev;
            }
            false
        }
        KeyCode::Right => {
            if let Some(next) = next_grapheme_boundary(buf, *cursor) {
                *cursor = next;
            }
            false
        }
        KeyCode::Home => {
            *cursor = 0;
            false
        }
        KeyCode::End => {
            *cursor = buf.len();
            false
        }
        _ => false,
    }
}

/// Search input: the filter follows every keystroke.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.mode = Mode::Navigate,
        KeyCode::Esc => {
            app.search_input.clear();
            app.search_cursor = 0;
            app.sync_search();
            app.mode = Mode::Navigate;
        }
        _ => {
            if apply_text_key(&mut app.search_input, &mut app.search_cursor, key) {
                app.sync_search();
            }
        }
    }
}

/// New-task input. Stays open after a submit so several tasks can be added.
pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            let result = app.list.create(&app.add_input);
            match app.note_save(result) {
                Some(Some(id)) => {
                    app.add_input.clear();
                    app.add_cursor = 0;
                    app.select(id);
                }
                Some(None) => {}
                // Save failed but the task exists in memory.
                None => {
                    app.add_input.clear();
                    app.add_cursor = 0;
                }
            }
        }
        KeyCode::Esc => {
            app.add_input.clear();
            app.add_cursor = 0;
            app.mode = Mode::Navigate;
        }
        _ => {
            apply_text_key(&mut app.add_input, &mut app.add_cursor, key);
        }
    }
}

/// Inline edit of the selected task's draft.
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            let editing = app.list.edit_session().editing_id();
            let result = app.list.commit_edit();
            match result {
                Ok(true) => app.mode = Mode::Navigate,
                Ok(false) => app.set_info("Task text cannot be empty"),
                Err(e) => {
                    // The new text is in memory; only the write failed.
                    app.note_save::<()>(Err(e));
                    app.mode = Mode::Navigate;
                }
            }
            if app.mode == Mode::Navigate
                && let Some(id) = editing
            {
                app.select(id);
            }
        }
        KeyCode::Esc => {
            app.list.cancel_edit();
            app.mode = Mode::Navigate;
        }
        _ => {
            apply_text_key(app.list.draft_mut(), &mut app.edit_cursor, key);
        }
    }
}
