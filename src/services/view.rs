//! View derivation: the pure projection from the authoritative collection
//! and the current [`ViewParameters`] to the rows the user sees.
//!
//! Steps run in a fixed order: tab partition, search, priority filter,
//! status filter, due-date sort. Search, filters and sort only shape the All
//! tab. Sorting is stable and puts tasks without a usable due date last in
//! both directions.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::models::{SortMode, Tab, Task, ViewParameters};

/// Compute the ordered rows for `params`, with `today` as the reference date
/// for the Today tab.
///
/// Never mutates `tasks`; identical inputs always yield equal output.
pub fn derive_view(tasks: &[Task], params: &ViewParameters, today: NaiveDate) -> Vec<Task> {
    let mut rows: Vec<&Task> = match params.tab {
        Tab::All => tasks.iter().collect(),
        Tab::Today => tasks.iter().filter(|t| is_due_on(t, today)).collect(),
        Tab::Completed => tasks.iter().filter(|t| t.completed).collect(),
        Tab::MentorCalls => Vec::new(),
    };

    if params.tab == Tab::All {
        if !params.search.trim().is_empty() {
            let needle = params.search.to_lowercase();
            rows.retain(|t| t.name.to_lowercase().contains(&needle));
        }
        if let Some(priority) = params.priority {
            rows.retain(|t| t.priority == priority);
        }
        if let Some(status) = params.status {
            rows.retain(|t| status.matches(t.completed));
        }
        if let Some(sort) = params.sort {
            sort_by_due_date(&mut rows, sort);
        }
    }

    rows.into_iter().cloned().collect()
}

fn is_due_on(task: &Task, day: NaiveDate) -> bool {
    task.due_date
        .as_ref()
        .and_then(|d| d.date())
        .is_some_and(|d| d == day)
}

fn sort_by_due_date(rows: &mut [&Task], mode: SortMode) {
    rows.sort_by(|a, b| compare_due(a, b, mode));
}

fn compare_due(a: &Task, b: &Task, mode: SortMode) -> Ordering {
    let a_date = a.due_date.as_ref().and_then(|d| d.date());
    let b_date = b.due_date.as_ref().and_then(|d| d.date());
    match (a_date, b_date) {
        (Some(x), Some(y)) => match mode {
            SortMode::EarliestDueFirst => x.cmp(&y),
            SortMode::LatestDueFirst => y.cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Per-tab row counts, for headers and tab badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewCounts {
    pub all: usize,
    pub today: usize,
    pub completed: usize,
}

pub fn view_counts(tasks: &[Task], today: NaiveDate) -> ViewCounts {
    ViewCounts {
        all: tasks.len(),
        today: tasks.iter().filter(|t| is_due_on(t, today)).count(),
        completed: tasks.iter().filter(|t| t.completed).count(),
    }
}
