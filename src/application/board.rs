//! The interactive board: one session's tasks, notes and view state.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::instrument;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Priority, SortMode, StatusFilter, Tab, Task, ViewParameters};
use crate::domain::ports::TaskStore;
use crate::services::{derive_view, view_counts, MentorCallNotes, MutationDispatcher, ViewCounts};

/// Shown in place of the task table when the All view has no rows.
pub const EMPTY_VIEW_MESSAGE: &str =
    "Productivity is never an accident. It is always the result of a commitment to excellence.";

/// Shown on the Mentor Calls tab before any note is added.
pub const EMPTY_NOTES_MESSAGE: &str = "No mentor call notes added yet.";

/// One interactive session: the task dispatcher, the session's mentor call
/// notes, the current view parameters and the reference date for "today".
///
/// All writes go through [`Board::tasks`]; everything the user sees is
/// derived from the engine on demand.
pub struct Board<S: TaskStore + ?Sized> {
    dispatcher: MutationDispatcher<S>,
    notes: MentorCallNotes,
    params: ViewParameters,
    today: NaiveDate,
}

impl<S: TaskStore + ?Sized> Board<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_today(store, Local::now().date_naive())
    }

    pub fn with_today(store: Arc<S>, today: NaiveDate) -> Self {
        Self {
            dispatcher: MutationDispatcher::new(store),
            notes: MentorCallNotes::new(),
            params: ViewParameters::default(),
            today,
        }
    }

    /// Run the initial bulk load. Until it succeeds every view is empty.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> DomainResult<usize> {
        self.dispatcher.load().await
    }

    pub fn tasks(&self) -> &MutationDispatcher<S> {
        &self.dispatcher
    }

    pub fn notes(&self) -> &MentorCallNotes {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut MentorCallNotes {
        &mut self.notes
    }

    pub fn params(&self) -> &ViewParameters {
        &self.params
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Switch tabs. Filters stay as they were; they only shape the All tab.
    pub fn select_tab(&mut self, tab: Tab) {
        self.params.tab = tab;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.params.search = search.into();
    }

    pub fn set_priority(&mut self, priority: Option<Priority>) {
        self.params.priority = priority;
    }

    pub fn set_status(&mut self, status: Option<StatusFilter>) {
        self.params.status = status;
    }

    pub fn set_sort(&mut self, sort: Option<SortMode>) {
        self.params.sort = sort;
    }

    pub fn reset_filters(&mut self) {
        self.params.reset_filters();
    }

    /// Rows for the current parameters.
    pub async fn visible_tasks(&self) -> Vec<Task> {
        let engine = self.dispatcher.engine();
        let engine = engine.read().await;
        derive_view(engine.tasks(), &self.params, self.today)
    }

    pub async fn counts(&self) -> ViewCounts {
        let engine = self.dispatcher.engine();
        let engine = engine.read().await;
        view_counts(engine.tasks(), self.today)
    }

    pub fn heading(&self) -> &'static str {
        self.params.tab.heading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteTaskStore};
    use crate::domain::models::{DueDate, TaskDraft};

    async fn board() -> Board<SqliteTaskStore> {
        let store = SqliteTaskStore::new(create_migrated_test_pool().await.unwrap());
        Board::with_today(Arc::new(store), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
    }

    #[tokio::test]
    async fn test_views_follow_confirmed_mutations() {
        let mut board = board().await;
        assert_eq!(board.initialize().await.unwrap(), 0);
        assert!(board.visible_tasks().await.is_empty());

        board
            .tasks()
            .create(
                TaskDraft::new("Write report")
                    .with_priority(Priority::High)
                    .with_due_date("2024-01-10"),
            )
            .await
            .unwrap();
        let review = board
            .tasks()
            .create(
                TaskDraft::new("Review PR")
                    .with_priority(Priority::Low)
                    .with_due_date(DueDate::new("2024-01-05")),
            )
            .await
            .unwrap();
        board.tasks().toggle_complete(&review.key).await.unwrap();

        board.set_sort(Some(SortMode::EarliestDueFirst));
        let names: Vec<_> = board.visible_tasks().await.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Review PR", "Write report"]);

        board.select_tab(Tab::Today);
        assert_eq!(board.heading(), "Today's Tasks");
        let names: Vec<_> = board.visible_tasks().await.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Review PR"]);

        let counts = board.counts().await;
        assert_eq!((counts.all, counts.today, counts.completed), (2, 1, 1));
    }

    #[tokio::test]
    async fn test_views_are_empty_before_load() {
        let store = SqliteTaskStore::new(create_migrated_test_pool().await.unwrap());
        let seeded = Arc::new(store);
        let seeding = Board::with_today(Arc::clone(&seeded), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        seeding
            .tasks()
            .create(TaskDraft::new("Existing").with_priority(Priority::Medium))
            .await
            .unwrap();

        let board = Board::with_today(seeded, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert!(board.visible_tasks().await.is_empty());
        board.initialize().await.unwrap();
        assert_eq!(board.visible_tasks().await.len(), 1);
    }

    #[tokio::test]
    async fn test_session_notes_are_independent_of_tasks() {
        let mut board = board().await;
        board.initialize().await.unwrap();
        board
            .notes_mut()
            .create(DueDate::new("2024-01-05"), "Talked about testing")
            .unwrap();

        board.select_tab(Tab::MentorCalls);
        assert!(board.visible_tasks().await.is_empty());
        assert_eq!(board.notes().len(), 1);
    }
}
