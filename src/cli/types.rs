//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::init::InitArgs;
use crate::cli::commands::note::CallNoteCommands;
use crate::cli::commands::task::{AddArgs, EditArgs, KeyArgs, ListArgs};
use crate::domain::models::{DueDate, Priority, SortMode, StatusFilter, Tab};

#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(about = "Taskboard - personal task tracker with mentor call notes", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .taskboard/
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize taskboard configuration and database
    Init(InitArgs),

    /// Create a task
    Add(AddArgs),

    /// List tasks for a tab, with optional search, filters and sort
    List(ListArgs),

    /// Edit a task; only the given fields change
    Edit(EditArgs),

    /// Flip a task between completed and incomplete
    Toggle(KeyArgs),

    /// Delete a task
    #[command(alias = "delete")]
    Rm(KeyArgs),

    /// Delete every completed task
    ClearCompleted,

    /// Stored mentor call note records
    #[command(subcommand)]
    CallNote(CallNoteCommands),

    /// Interactive session with session-local mentor call notes
    Shell,
}

/// Parse a priority name (low, medium, high).
pub fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::from_str(s).ok_or_else(|| format!("invalid priority '{s}': expected low, medium or high"))
}

pub fn parse_tab(s: &str) -> Result<Tab, String> {
    Tab::from_str(s).ok_or_else(|| format!("invalid tab '{s}': expected all, today, completed or mentor-calls"))
}

pub fn parse_status(s: &str) -> Result<StatusFilter, String> {
    StatusFilter::from_str(s).ok_or_else(|| format!("invalid status '{s}': expected completed or incomplete"))
}

pub fn parse_sort(s: &str) -> Result<SortMode, String> {
    SortMode::from_str(s).ok_or_else(|| format!("invalid sort '{s}': expected earliest or latest"))
}

/// Parse a due date. Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_due_date(s: &str) -> Result<DueDate, String> {
    let due = DueDate::new(s.trim());
    if due.is_valid() {
        Ok(due)
    } else {
        Err(format!("invalid date '{s}': expected YYYY-MM-DD"))
    }
}
