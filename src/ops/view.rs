use serde::Serialize;

use crate::model::filter::{FilterState, Tab};
use crate::model::task::Task;

/// Per-tab counts over the whole store (search term ignored)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn for_tab(&self, tab: Tab) -> usize {
        match tab {
            Tab::All => self.total,
            Tab::Pending => self.pending,
            Tab::Completed => self.completed,
        }
    }
}

/// Count pending and completed tasks.
pub fn counts(tasks: &[Task]) -> TaskCounts {
    let completed = tasks.iter().filter(|t| t.completed).count();
    TaskCounts {
        total: tasks.len(),
        pending: tasks.len() - completed,
        completed,
    }
}

/// Case-insensitive substring match. An empty term matches everything.
pub fn matches_search(text: &str, term: &str) -> bool {
    term.is_empty() || text.to_lowercase().contains(&term.to_lowercase())
}

/// The tasks visible under `filter`, in store order.
pub fn visible_tasks<'a>(tasks: &'a [Task], filter: &FilterState) -> Vec<&'a Task> {
    let term = filter.search_term.to_lowercase();
    tasks
        .iter()
        .filter(|t| filter.active_tab.admits(t.completed))
        .filter(|t| term.is_empty() || t.text.to_lowercase().contains(&term))
        .collect()
}
