//! View parameters chosen by the user for rendering the task list.

use serde::{Deserialize, Serialize};

use super::task::Priority;

/// Which tab of the board is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    All,
    Today,
    Completed,
    MentorCalls,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Completed => "completed",
            Self::MentorCalls => "mentor_calls",
        }
    }

    /// Heading shown above the tab's content.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::All => "All Tasks",
            Self::Today => "Today's Tasks",
            Self::Completed => "Completed Tasks",
            Self::MentorCalls => "Mentor Call Notes",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "all" | "all_tasks" => Some(Self::All),
            "today" => Some(Self::Today),
            "completed" | "done" => Some(Self::Completed),
            "mentor_calls" | "mentor" | "notes" => Some(Self::MentorCalls),
            _ => None,
        }
    }
}

/// Completion status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    Completed,
    Incomplete,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Incomplete => "incomplete",
        }
    }

    pub fn matches(&self, completed: bool) -> bool {
        match self {
            Self::Completed => completed,
            Self::Incomplete => !completed,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "completed" | "complete" | "done" => Some(Self::Completed),
            "incomplete" | "open" | "pending" => Some(Self::Incomplete),
            _ => None,
        }
    }
}

/// Due-date ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    EarliestDueFirst,
    LatestDueFirst,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EarliestDueFirst => "earliest",
            Self::LatestDueFirst => "latest",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "earliest" | "asc" => Some(Self::EarliestDueFirst),
            "latest" | "desc" => Some(Self::LatestDueFirst),
            _ => None,
        }
    }
}

/// Everything that shapes the visible task list. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewParameters {
    pub tab: Tab,
    pub search: String,
    pub priority: Option<Priority>,
    pub status: Option<StatusFilter>,
    pub sort: Option<SortMode>,
}

impl ViewParameters {
    pub fn for_tab(tab: Tab) -> Self {
        Self {
            tab,
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Drop search, filters and sort, keeping the tab.
    pub fn reset_filters(&mut self) {
        *self = Self::for_tab(self.tab);
    }
}
