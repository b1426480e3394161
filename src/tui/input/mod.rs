mod navigate;
mod text;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

use navigate::handle_navigate;
use text::{handle_add, handle_edit, handle_search};

pub use text::apply_text_key;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Help overlay swallows the next key
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Any key dismisses the previous status message
    app.status = None;

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Add => handle_add(app, key),
        Mode::Edit => handle_edit(app, key),
    }
}
