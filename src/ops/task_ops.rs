use chrono::Utc;

use crate::model::task::{Task, TaskId, normalize_text};

// ---------------------------------------------------------------------------
// Id generation
// ---------------------------------------------------------------------------

/// Issues strictly increasing task ids from the wall clock.
///
/// Each id is the current time in milliseconds, bumped past the previous id
/// when the clock hasn't advanced (or went backwards), so two creations in
/// the same tick still get distinct ids.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// A generator that never reissues any id in `tasks`.
    pub fn seeded(tasks: &[Task]) -> Self {
        IdGenerator {
            last: tasks.iter().map(|t| t.id.0).max().unwrap_or(0),
        }
    }

    pub fn next(&mut self) -> TaskId {
        self.next_at(Utc::now().timestamp_millis())
    }

    /// Next id given the current time in milliseconds since the epoch.
    pub fn next_at(&mut self, now_millis: i64) -> TaskId {
        let now = u64::try_from(now_millis).unwrap_or(0);
        let id = now.max(self.last.saturating_add(1));
        self.last = id;
        TaskId(id)
    }
}

// ---------------------------------------------------------------------------
// Task store
// ---------------------------------------------------------------------------

/// Ordered task collection. New tasks go at the end.
///
/// Every mutator returns whether the store changed. Blank text and unknown
/// ids are no-ops, never errors.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    ids: IdGenerator,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-loaded list, keeping its order.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let ids = IdGenerator::seeded(&tasks);
        TaskStore { tasks, ids }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Append a pending task with the trimmed text. Returns its id, or
    /// `None` if the text is blank.
    pub fn create(&mut self, text: &str) -> Option<TaskId> {
        // Validate before drawing an id so rejected input doesn't burn one.
        let text = normalize_text(text)?;
        let id = self.ids.next();
        Some(self.push(id, text))
    }

    /// [`TaskStore::create`] with an explicit clock reading.
    pub fn create_at(&mut self, text: &str, now_millis: i64) -> Option<TaskId> {
        let text = normalize_text(text)?;
        let id = self.ids.next_at(now_millis);
        Some(self.push(id, text))
    }

    fn push(&mut self, id: TaskId, text: String) -> TaskId {
        self.tasks.push(Task {
            id,
            text,
            completed: false,
        });
        id
    }

    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn toggle_completed(&mut self, id: TaskId) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Replace a task's text with the trimmed `new_text`.
    pub fn edit_text(&mut self, id: TaskId, new_text: &str) -> bool {
        let Some(text) = normalize_text(new_text) else {
            return false;
        };
        match self.get_mut(id) {
            Some(task) => {
                task.text = text;
                true
            }
            None => false,
        }
    }
}
