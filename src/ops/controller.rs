use tracing::warn;

use crate::io::persistence::{read_tasks, save_tasks};
use crate::io::storage::{Storage, StorageError};
use crate::model::filter::{FilterState, Tab};
use crate::model::task::{Task, TaskId};
use crate::ops::edit_session::EditSession;
use crate::ops::task_ops::TaskStore;
use crate::ops::view::{self, TaskCounts};

/// Owns the task list and everything done to it.
///
/// Every mutation that changes the store is saved before the call returns.
/// Mutators answer `Ok(false)` for no-ops (blank text, unknown id) and only
/// fail when the storage write fails; the in-memory change stands either way.
pub struct TaskList<S: Storage> {
    store: TaskStore,
    storage: S,
    key: String,
    filter: FilterState,
    edit: EditSession,
    /// Set when the stored value could not be read or backed up.
    protected: bool,
}

impl<S: Storage> TaskList<S> {
    /// Load the list stored under `key`, or start empty.
    pub fn load(mut storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let (tasks, protected) = match read_tasks(&mut storage, &key) {
            Ok(tasks) => (tasks, false),
            Err(e) => {
                warn!(key = %key, error = %e, "stored task list left untouched, changes won't be saved");
                (Vec::new(), true)
            }
        };
        TaskList {
            store: TaskStore::from_tasks(tasks),
            storage,
            key,
            filter: FilterState::default(),
            edit: EditSession::default(),
            protected,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.store.get(id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// True when the stored list could not be read or backed up. Saves are
    /// refused so the stored value is never overwritten.
    pub fn is_protected(&self) -> bool {
        self.protected
    }

    // -----------------------------------------------------------------------
    // Store mutations
    // -----------------------------------------------------------------------

    pub fn create(&mut self, text: &str) -> Result<Option<TaskId>, StorageError> {
        let id = self.store.create(text);
        if id.is_some() {
            self.save()?;
        }
        Ok(id)
    }

    pub fn delete(&mut self, id: TaskId) -> Result<bool, StorageError> {
        if !self.store.delete(id) {
            return Ok(false);
        }
        // The session may only point at a live task.
        if self.edit.is_editing(id) {
            self.edit.clear();
        }
        self.save()?;
        Ok(true)
    }

    pub fn toggle_completed(&mut self, id: TaskId) -> Result<bool, StorageError> {
        if !self.store.toggle_completed(id) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Replace a task's text. Ends the edit session on success.
    pub fn edit_text(&mut self, id: TaskId, new_text: &str) -> Result<bool, StorageError> {
        if !self.store.edit_text(id, new_text) {
            return Ok(false);
        }
        self.edit.clear();
        self.save()?;
        Ok(true)
    }

    fn save(&mut self) -> Result<(), StorageError> {
        if self.protected {
            return Err(StorageError::Protected {
                key: self.key.clone(),
            });
        }
        save_tasks(&mut self.storage, &self.key, self.store.tasks()).inspect_err(|e| {
            warn!(key = %self.key, error = %e, "could not save task list");
        })
    }

    // -----------------------------------------------------------------------
    // Edit session
    // -----------------------------------------------------------------------

    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    /// Start editing task `id`. Unknown ids leave the session as it was.
    pub fn begin_edit(&mut self, id: TaskId) -> bool {
        match self.store.get(id) {
            Some(task) => {
                self.edit.begin(task);
                true
            }
            None => false,
        }
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.edit.update_draft(text);
    }

    /// Mutable draft buffer for cursor-level editing in the TUI
    pub fn draft_mut(&mut self) -> &mut String {
        self.edit.draft_mut()
    }

    /// Apply the draft. A blank draft or a vanished task leaves the
    /// session open and the store untouched.
    pub fn commit_edit(&mut self) -> Result<bool, StorageError> {
        let Some(id) = self.edit.editing_id() else {
            return Ok(false);
        };
        let draft = self.edit.draft().to_string();
        self.edit_text(id, &draft)
    }

    pub fn cancel_edit(&mut self) {
        self.edit.clear();
    }

    // -----------------------------------------------------------------------
    // View projection
    // -----------------------------------------------------------------------

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.filter.active_tab = tab;
    }

    pub fn visible(&self) -> Vec<&Task> {
        view::visible_tasks(self.store.tasks(), &self.filter)
    }

    pub fn counts(&self) -> TaskCounts {
        view::counts(self.store.tasks())
    }
}
