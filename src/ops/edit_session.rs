use crate::model::task::{Task, TaskId};

/// The single in-progress edit, if any.
///
/// Holds the edited task's id only; the task itself stays in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    editing_id: Option<TaskId>,
    draft: String,
}

impl EditSession {
    pub fn editing_id(&self) -> Option<TaskId> {
        self.editing_id
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_active(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn is_editing(&self, id: TaskId) -> bool {
        self.editing_id == Some(id)
    }

    /// Start editing `task`, discarding any previous draft.
    pub fn begin(&mut self, task: &Task) {
        self.editing_id = Some(task.id);
        self.draft = task.text.clone();
    }

    /// Replace the draft. No validation happens until commit.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Mutable access for in-place cursor editing
    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    pub fn clear(&mut self) {
        self.editing_id = None;
        self.draft.clear();
    }
}
