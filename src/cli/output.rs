use serde::Serialize;

use crate::model::filter::Tab;
use crate::model::task::Task;
use crate::ops::view::TaskCounts;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskListJson<'a> {
    pub tab: Tab,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<&'a str>,
    pub tasks: Vec<&'a Task>,
    pub counts: TaskCounts,
}

#[derive(Serialize)]
pub struct ChangeJson<'a> {
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<&'a Task>,
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as a one-line summary: `[x] 1712345678901 buy milk`
pub fn format_task_line(task: &Task) -> String {
    format!("{} {} {}", task.checkbox(), task.id, task.text)
}

/// Format counts as the TUI's tab labels
pub fn format_counts(counts: &TaskCounts) -> String {
    Tab::ALL
        .iter()
        .map(|tab| format!("{} ({})", tab.label(), counts.for_tab(*tab)))
        .collect::<Vec<_>>()
        .join("  ")
}
