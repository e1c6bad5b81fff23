//! Task commands: add, list, edit, toggle, rm and clear-completed.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use super::open_board;
use crate::application::{Board, EMPTY_VIEW_MESSAGE};
use crate::cli::display::{render_list, task_table};
use crate::cli::id_resolver::resolve_task_key;
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::{parse_due_date, parse_priority, parse_sort, parse_status, parse_tab};
use crate::domain::errors::DomainError;
use crate::domain::models::{Config, DueDate, Priority, SortMode, StatusFilter, Tab, Task, TaskDraft, TaskKey};
use crate::domain::ports::TaskStore;
use crate::services::{ClearCompletedReport, ViewCounts};

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Task name
    pub name: String,

    /// Longer description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Due date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_due_date)]
    pub due: Option<DueDate>,

    /// Priority: low, medium or high
    #[arg(short, long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
}

impl AddArgs {
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            due_date: self.due.clone(),
            priority: self.priority,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Tab: all, today, completed or mentor-calls
    #[arg(short, long, value_parser = parse_tab, default_value = "all")]
    pub tab: Tab,

    /// Case-insensitive name search (All tab only)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only this priority (All tab only)
    #[arg(short, long, value_parser = parse_priority)]
    pub priority: Option<Priority>,

    /// completed or incomplete (All tab only)
    #[arg(long, value_parser = parse_status)]
    pub status: Option<StatusFilter>,

    /// Due-date order: earliest or latest (All tab only)
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortMode>,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    /// Task key or unique prefix
    pub key: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,

    /// New due date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_due_date, conflicts_with = "clear_due")]
    pub due: Option<DueDate>,

    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,

    /// New priority
    #[arg(short, long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
}

impl EditArgs {
    /// Start from the task's current values and overlay the given fields.
    pub fn apply_to(&self, current: &Task) -> TaskDraft {
        let mut draft = current.to_draft();
        if let Some(name) = &self.name {
            draft.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            draft.description.clone_from(description);
        }
        if self.clear_due {
            draft.due_date = None;
        } else if let Some(due) = &self.due {
            draft.due_date = Some(due.clone());
        }
        if let Some(priority) = self.priority {
            draft.priority = Some(priority);
        }
        draft
    }
}

#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// Task key or unique prefix
    pub key: String,
}

#[derive(Debug, Serialize)]
pub struct TaskOutput {
    pub message: String,
    pub task: Task,
}

impl CommandOutput for TaskOutput {
    fn to_human(&self) -> String {
        format!("{} {}", self.message, self.task.key)
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedOutput {
    pub deleted: TaskKey,
}

impl CommandOutput for DeletedOutput {
    fn to_human(&self) -> String {
        format!("Deleted task {}", self.deleted)
    }
}

#[derive(Debug, Serialize)]
pub struct TaskListOutput {
    pub tab: Tab,
    pub heading: &'static str,
    pub tasks: Vec<Task>,
    pub counts: ViewCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl TaskListOutput {
    pub async fn from_board<S: TaskStore + ?Sized>(board: &Board<S>) -> Self {
        let tasks = board.visible_tasks().await;
        let tab = board.params().tab;
        let empty_message = (tasks.is_empty() && tab == Tab::All).then_some(EMPTY_VIEW_MESSAGE);
        Self {
            tab,
            heading: board.heading(),
            counts: board.counts().await,
            tasks,
            empty_message,
        }
    }
}

impl CommandOutput for TaskListOutput {
    fn to_human(&self) -> String {
        let heading = console::style(self.heading).bold().underlined();
        if let Some(message) = self.empty_message {
            return format!("{heading}\n\n{message}");
        }
        let body = render_list("task", task_table(&self.tasks), self.tasks.len());
        format!(
            "{heading}  (all {} / today {} / completed {})\n\n{body}",
            self.counts.all, self.counts.today, self.counts.completed
        )
    }
}

#[derive(Debug, Serialize)]
pub struct FailedDelete {
    pub key: TaskKey,
    pub error: String,
    pub status: u16,
}

#[derive(Debug, Serialize)]
pub struct ClearCompletedOutput {
    pub removed: Vec<TaskKey>,
    pub failed: Vec<FailedDelete>,
}

impl From<ClearCompletedReport> for ClearCompletedOutput {
    fn from(report: ClearCompletedReport) -> Self {
        Self {
            removed: report.removed,
            failed: report
                .failed
                .into_iter()
                .map(|(key, err)| FailedDelete {
                    key,
                    status: err.status_code(),
                    error: err.to_string(),
                })
                .collect(),
        }
    }
}

impl CommandOutput for ClearCompletedOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!("Removed {} completed task(s)", self.removed.len())];
        for failed in &self.failed {
            lines.push(format!("  failed {}: {}", failed.key, failed.error));
        }
        lines.join("\n")
    }
}

pub async fn add(args: AddArgs, config: &Config, json_mode: bool) -> Result<()> {
    let board = open_board(config).await?;
    let task = board.tasks().create(args.to_draft()).await?;
    output(
        &TaskOutput {
            message: "Created task".to_string(),
            task,
        },
        json_mode,
    );
    Ok(())
}

pub async fn list(args: ListArgs, config: &Config, json_mode: bool) -> Result<()> {
    let mut board = open_board(config).await?;
    board.select_tab(args.tab);
    board.set_search(args.search.unwrap_or_default());
    board.set_priority(args.priority);
    board.set_status(args.status);
    board.set_sort(args.sort);

    output(&TaskListOutput::from_board(&board).await, json_mode);
    Ok(())
}

pub async fn edit(args: EditArgs, config: &Config, json_mode: bool) -> Result<()> {
    let board = open_board(config).await?;
    let (key, current) = resolve(&board, &args.key).await?;
    let task = board.tasks().edit(&key, args.apply_to(&current)).await?;
    output(
        &TaskOutput {
            message: "Updated task".to_string(),
            task,
        },
        json_mode,
    );
    Ok(())
}

pub async fn toggle(args: KeyArgs, config: &Config, json_mode: bool) -> Result<()> {
    let board = open_board(config).await?;
    let (key, _) = resolve(&board, &args.key).await?;
    let completed = board.tasks().toggle_complete(&key).await?;
    let task = board
        .tasks()
        .engine()
        .read()
        .await
        .get(&key)
        .cloned()
        .ok_or_else(|| DomainError::TaskNotFound(key.clone()))?;
    output(
        &TaskOutput {
            message: if completed { "Completed task" } else { "Reopened task" }.to_string(),
            task,
        },
        json_mode,
    );
    Ok(())
}

pub async fn remove(args: KeyArgs, config: &Config, json_mode: bool) -> Result<()> {
    let board = open_board(config).await?;
    let (key, _) = resolve(&board, &args.key).await?;
    board.tasks().delete(&key).await?;
    output(&DeletedOutput { deleted: key }, json_mode);
    Ok(())
}

pub async fn clear_completed(config: &Config, json_mode: bool) -> Result<()> {
    let board = open_board(config).await?;
    let report = ClearCompletedOutput::from(board.tasks().clear_completed().await);
    output(&report, json_mode);
    if !report.failed.is_empty() {
        bail!("{} completed task(s) could not be removed", report.failed.len());
    }
    Ok(())
}

pub(crate) async fn resolve<S: TaskStore + ?Sized>(board: &Board<S>, prefix: &str) -> Result<(TaskKey, Task)> {
    let engine = board.tasks().engine();
    let engine = engine.read().await;
    let key = resolve_task_key(engine.tasks(), prefix)?;
    let task = engine
        .get(&key)
        .cloned()
        .ok_or_else(|| DomainError::TaskNotFound(key.clone()))?;
    Ok((key, task))
}
