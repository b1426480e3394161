use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::config_io::Settings;
use crate::io::storage::{FileStorage, Storage, StorageError};
use crate::model::filter::Tab;
use crate::model::task::{Task, TaskId};
use crate::ops::controller::TaskList;

use super::input;
use super::render;
use super::theme::Theme;

/// Which input has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the task list
    Navigate,
    /// Typing in the search input
    Search,
    /// Typing in the new-task input
    Add,
    /// Editing the draft of one task
    Edit,
}

/// A one-line message for the status row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct App {
    pub list: TaskList<Box<dyn Storage>>,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_help: bool,
    pub show_key_hints: bool,
    /// Index into the visible task list
    pub cursor: usize,
    /// First visible row of the task list
    pub scroll_offset: usize,
    /// Search input (mirrored into the list's filter on every change)
    pub search_input: String,
    pub search_cursor: usize,
    /// New-task input
    pub add_input: String,
    pub add_cursor: usize,
    /// Cursor within the edit draft (byte offset)
    pub edit_cursor: usize,
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(list: TaskList<Box<dyn Storage>>, theme: Theme) -> Self {
        App {
            list,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            show_help: false,
            show_key_hints: true,
            cursor: 0,
            scroll_offset: 0,
            search_input: String::new(),
            search_cursor: 0,
            add_input: String::new(),
            add_cursor: 0,
            edit_cursor: 0,
            status: None,
        }
    }

    /// Build the app from resolved settings, opening the file-backed list
    pub fn from_settings(settings: &Settings) -> Self {
        let storage: Box<dyn Storage> = Box::new(FileStorage::new(&settings.data_dir));
        let mut list = TaskList::load(storage, &settings.config.storage.key);
        list.set_tab(settings.config.ui.default_tab);

        let mut app = App::new(list, Theme::from_config(&settings.config.ui));
        app.show_key_hints = settings.config.ui.show_key_hints;
        if app.list.is_protected() {
            app.status = Some(StatusMessage {
                text: format!(
                    "could not read stored tasks in {}; changes will not be saved",
                    settings.data_dir.display()
                ),
                is_error: true,
            });
        }
        app
    }

    pub fn visible(&self) -> Vec<&Task> {
        self.list.visible()
    }

    pub fn active_tab(&self) -> Tab {
        self.list.filter().active_tab
    }

    /// The task under the cursor
    pub fn selected_id(&self) -> Option<TaskId> {
        self.visible().get(self.cursor).map(|t| t.id)
    }

    /// Keep the cursor inside the visible list after it shrinks.
    pub fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Move the cursor onto `id` if it is visible.
    pub fn select(&mut self, id: TaskId) {
        if let Some(pos) = self.visible().iter().position(|t| t.id == id) {
            self.cursor = pos;
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        let selected = self.selected_id();
        self.list.set_tab(tab);
        self.cursor = 0;
        if let Some(id) = selected {
            self.select(id);
        }
        self.clamp_cursor();
    }

    /// Push the search input into the filter (live search).
    pub fn sync_search(&mut self) {
        self.list.set_search_term(self.search_input.clone());
        self.cursor = 0;
    }

    /// Record the outcome of a save, surfacing failures on the status row.
    pub fn note_save<T>(&mut self, result: Result<T, StorageError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.status = Some(StatusMessage {
                    text: format!("save failed: {}", e),
                    is_error: true,
                });
                None
            }
        }
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    /// Highlight regex for the current search term
    pub fn active_search_re(&self) -> Option<Regex> {
        let term = &self.list.filter().search_term;
        if term.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(term))).ok()
    }
}

/// Run the TUI application
pub fn run(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::from_settings(settings);
    tracing::info!(
        data_dir = %settings.data_dir.display(),
        tasks = app.list.tasks().len(),
        "starting tui"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::app_with_tasks;

    #[test]
    fn selected_follows_cursor() {
        let mut app = app_with_tasks(&["a", "b", "c"]);
        app.cursor = 1;
        let b = app.list.tasks()[1].id;
        assert_eq!(app.selected_id(), Some(b));
    }

    #[test]
    fn switching_tab_keeps_selection_when_visible() {
        let mut app = app_with_tasks(&["a", "b", "c"]);
        let a = app.list.tasks()[0].id;
        let c = app.list.tasks()[2].id;
        app.list.toggle_completed(a).unwrap();
        app.cursor = 2;

        app.set_tab(Tab::Pending);
        assert_eq!(app.selected_id(), Some(c));
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn switching_to_empty_tab_clamps_cursor() {
        let mut app = app_with_tasks(&["a", "b"]);
        app.cursor = 1;
        app.set_tab(Tab::Completed);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.selected_id(), None);
    }

    #[test]
    fn search_regex_escapes_term() {
        let mut app = app_with_tasks(&["a"]);
        assert!(app.active_search_re().is_none());
        app.search_input = "c++ (v2)".into();
        app.sync_search();
        let re = app.active_search_re().unwrap();
        assert!(re.is_match("learn C++ (V2) today"));
    }

    #[test]
    fn save_failure_lands_on_status_row() {
        let mut app = app_with_tasks(&[]);
        let err = StorageError::InvalidKey("x".into());
        assert_eq!(app.note_save::<()>(Err(err)), None);
        assert!(app.status.as_ref().unwrap().is_error);
    }
}
