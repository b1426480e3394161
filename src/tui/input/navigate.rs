use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::filter::Tab;
use crate::tui::app::{App, Mode};

/// Handle keys while moving through the task list
pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.should_quit = true;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Cursor
        KeyCode::Down | KeyCode::Char('j') => move_cursor(app, 1),
        KeyCode::Up | KeyCode::Char('k') => move_cursor(app, -1),
        KeyCode::Home | KeyCode::Char('g') => app.cursor = 0,
        KeyCode::End | KeyCode::Char('G') => {
            app.cursor = app.visible().len().saturating_sub(1);
        }

        // Tabs
        KeyCode::Tab => app.set_tab(app.active_tab().next()),
        KeyCode::BackTab => app.set_tab(app.active_tab().prev()),
        KeyCode::Char('1') => app.set_tab(Tab::All),
        KeyCode::Char('2') => app.set_tab(Tab::Pending),
        KeyCode::Char('3') => app.set_tab(Tab::Completed),

        // Inputs
        KeyCode::Char('/') => {
            app.search_cursor = app.search_input.len();
            app.mode = Mode::Search;
        }
        KeyCode::Char('a') | KeyCode::Char('n') => {
            app.add_cursor = app.add_input.len();
            app.mode = Mode::Add;
        }
        KeyCode::Esc => {
            if !app.search_input.is_empty() {
                app.search_input.clear();
                app.search_cursor = 0;
                app.sync_search();
            }
        }

        // Task actions
        KeyCode::Char(' ') | KeyCode::Char('x') => toggle_selected(app),
        KeyCode::Enter | KeyCode::Char('e') => begin_edit_selected(app),
        KeyCode::Char('d') | KeyCode::Delete => delete_selected(app),
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.visible().len();
    if len == 0 {
        app.cursor = 0;
        return;
    }
    let next = app.cursor.saturating_add_signed(delta);
    app.cursor = next.min(len - 1);
}

fn toggle_selected(app: &mut App) {
    let Some(id) = app.selected_id() else {
        return;
    };
    let result = app.list.toggle_completed(id);
    app.note_save(result);
    // On Pending/Completed tabs the task leaves the view.
    app.clamp_cursor();
}

fn begin_edit_selected(app: &mut App) {
    let Some(id) = app.selected_id() else {
        return;
    };
    if app.list.begin_edit(id) {
        app.edit_cursor = app.list.edit_session().draft().len();
        app.mode = Mode::Edit;
    }
}

fn delete_selected(app: &mut App) {
    let Some(id) = app.selected_id() else {
        return;
    };
    let result = app.list.delete(id);
    if app.note_save(result) == Some(true) {
        app.set_info("Task deleted");
    }
    app.clamp_cursor();
}
