use serde::{Deserialize, Serialize};

/// Which slice of the list is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    All,
    Pending,
    Completed,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::All, Tab::Pending, Tab::Completed];

    pub fn label(self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Pending => "Pending",
            Tab::Completed => "Completed",
        }
    }

    /// Parse a tab name (case-insensitive)
    pub fn parse(s: &str) -> Option<Tab> {
        match s.to_lowercase().as_str() {
            "all" => Some(Tab::All),
            "pending" => Some(Tab::Pending),
            "completed" | "done" => Some(Tab::Completed),
            _ => None,
        }
    }

    /// Next tab, wrapping around
    pub fn next(self) -> Tab {
        match self {
            Tab::All => Tab::Pending,
            Tab::Pending => Tab::Completed,
            Tab::Completed => Tab::All,
        }
    }

    pub fn prev(self) -> Tab {
        match self {
            Tab::All => Tab::Completed,
            Tab::Pending => Tab::All,
            Tab::Completed => Tab::Pending,
        }
    }

    /// Whether a task with the given completion flag belongs on this tab
    pub fn admits(self, completed: bool) -> bool {
        match self {
            Tab::All => true,
            Tab::Pending => !completed,
            Tab::Completed => completed,
        }
    }
}

/// Transient search/tab state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub active_tab: Tab,
}

impl FilterState {
    pub fn new(search_term: impl Into<String>, active_tab: Tab) -> Self {
        FilterState {
            search_term: search_term.into(),
            active_tab,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tab_names() {
        assert_eq!(Tab::parse("ALL"), Some(Tab::All));
        assert_eq!(Tab::parse("pending"), Some(Tab::Pending));
        assert_eq!(Tab::parse("done"), Some(Tab::Completed));
        assert_eq!(Tab::parse("later"), None);
    }

    #[test]
    fn next_and_prev_cycle() {
        for tab in Tab::ALL {
            assert_eq!(tab.next().prev(), tab);
        }
        assert_eq!(Tab::Completed.next(), Tab::All);
    }

    #[test]
    fn admits_by_completion() {
        assert!(Tab::All.admits(true) && Tab::All.admits(false));
        assert!(Tab::Pending.admits(false) && !Tab::Pending.admits(true));
        assert!(Tab::Completed.admits(true) && !Tab::Completed.admits(false));
    }

    #[test]
    fn tab_serde_is_lowercase() {
        let tab: Tab = serde_json::from_str(r#""completed""#).unwrap();
        assert_eq!(tab, Tab::Completed);
    }
}
