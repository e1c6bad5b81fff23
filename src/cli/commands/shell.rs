//! `taskboard shell`: an interactive session over one [`Board`].
//!
//! Each input line is parsed with clap. Mentor call notes recorded here live
//! only as long as the session.

use std::io::Write;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::open_board;
use super::task::{resolve, AddArgs, EditArgs, KeyArgs, TaskListOutput};
use crate::application::{Board, EMPTY_NOTES_MESSAGE};
use crate::cli::display::{note_table, render_list};
use crate::cli::output::CommandOutput;
use crate::cli::types::{parse_due_date, parse_priority, parse_sort, parse_status, parse_tab};
use crate::domain::models::{Config, DueDate, NoteId, Priority, SortMode, StatusFilter, Tab};
use crate::domain::ports::TaskStore;

const PROMPT: &str = "taskboard> ";

#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "shell", disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Show the current tab
    #[command(alias = "ls")]
    List,
    /// Switch tab: all, today, completed, mentor-calls
    Tab {
        #[arg(value_parser = parse_tab)]
        tab: Tab,
    },
    /// Search task names; no text clears the search
    Search { text: Vec<String> },
    /// Filter the All tab by priority and/or status
    Filter {
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<Priority>,
        #[arg(short, long, value_parser = parse_status)]
        status: Option<StatusFilter>,
    },
    /// Sort by due date: earliest or latest; no argument clears it
    Sort {
        #[arg(value_parser = parse_sort)]
        mode: Option<SortMode>,
    },
    /// Clear search, filters and sort
    Reset,
    Add(AddArgs),
    Edit(EditArgs),
    Toggle(KeyArgs),
    #[command(alias = "delete")]
    Rm(KeyArgs),
    ClearCompleted,
    /// Session mentor call notes
    #[command(subcommand)]
    Note(NoteCommand),
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
enum NoteCommand {
    Add {
        #[arg(value_parser = parse_due_date)]
        date: DueDate,
        #[arg(required = true)]
        description: Vec<String>,
    },
    Edit {
        id: NoteId,
        #[arg(value_parser = parse_due_date)]
        date: DueDate,
        #[arg(required = true)]
        description: Vec<String>,
    },
    Rm {
        id: NoteId,
    },
}

enum Flow {
    Continue,
    Quit,
}

pub async fn execute(config: &Config) -> Result<()> {
    let mut board = open_board(config).await?;
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run(&mut board, stdin, &mut stdout).await
}

/// Read commands from `input` until end of input or `quit`. Command failures
/// are reported to `out` and the session carries on.
pub async fn run<S, R, W>(board: &mut Board<S>, input: R, out: &mut W) -> Result<()>
where
    S: TaskStore + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", render_view(board).await)?;
    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let tokens = match shell_words::split(&line) {
            Ok(tokens) if tokens.is_empty() => continue,
            Ok(tokens) => tokens,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        };
        let parsed = match ShellLine::try_parse_from(tokens) {
            Ok(parsed) => parsed,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match dispatch(board, parsed.command).await {
            Ok((Flow::Quit, _)) => break,
            Ok((Flow::Continue, message)) => writeln!(out, "{message}")?,
            Err(err) => {
                tracing::debug!(error = %err, "shell command failed");
                writeln!(out, "error: {err:#}")?;
            }
        }
    }
    Ok(())
}

async fn dispatch<S: TaskStore + ?Sized>(board: &mut Board<S>, command: ShellCommand) -> Result<(Flow, String)> {
    let message = match command {
        ShellCommand::Quit => return Ok((Flow::Quit, String::new())),
        ShellCommand::List => render_view(board).await,
        ShellCommand::Tab { tab } => {
            board.select_tab(tab);
            render_view(board).await
        }
        ShellCommand::Search { text } => {
            board.set_search(text.join(" "));
            render_view(board).await
        }
        ShellCommand::Filter { priority, status } => {
            board.set_priority(priority);
            board.set_status(status);
            render_view(board).await
        }
        ShellCommand::Sort { mode } => {
            board.set_sort(mode);
            render_view(board).await
        }
        ShellCommand::Reset => {
            board.reset_filters();
            render_view(board).await
        }
        ShellCommand::Add(args) => {
            let task = board.tasks().create(args.to_draft()).await?;
            format!("Created task {}", task.key.short())
        }
        ShellCommand::Edit(args) => {
            let (key, current) = resolve(board, &args.key).await?;
            let task = board.tasks().edit(&key, args.apply_to(&current)).await?;
            format!("Updated task {}", task.key.short())
        }
        ShellCommand::Toggle(args) => {
            let (key, _) = resolve(board, &args.key).await?;
            let completed = board.tasks().toggle_complete(&key).await?;
            format!(
                "{} task {}",
                if completed { "Completed" } else { "Reopened" },
                key.short()
            )
        }
        ShellCommand::Rm(args) => {
            let (key, _) = resolve(board, &args.key).await?;
            board.tasks().delete(&key).await?;
            format!("Deleted task {}", key.short())
        }
        ShellCommand::ClearCompleted => {
            let report = board.tasks().clear_completed().await;
            if !report.failed.is_empty() {
                let detail: Vec<String> = report
                    .failed
                    .iter()
                    .map(|(key, err)| format!("{}: {err}", key.short()))
                    .collect();
                bail!(
                    "removed {} task(s), {} failed ({})",
                    report.removed.len(),
                    report.failed.len(),
                    detail.join("; ")
                );
            }
            format!("Removed {} completed task(s)", report.removed.len())
        }
        ShellCommand::Note(note) => note_command(board, note)?,
    };
    Ok((Flow::Continue, message))
}

fn note_command<S: TaskStore + ?Sized>(board: &mut Board<S>, command: NoteCommand) -> Result<String> {
    let notes = board.notes_mut();
    Ok(match command {
        NoteCommand::Add { date, description } => {
            let note = notes.create(date, description.join(" "))?;
            format!("Added note {}", note.id)
        }
        NoteCommand::Edit { id, date, description } => {
            let note = notes.edit(id, date, description.join(" "))?;
            format!("Updated note {}", note.id)
        }
        NoteCommand::Rm { id } => {
            notes.delete(id)?;
            format!("Deleted note {id}")
        }
    })
}

async fn render_view<S: TaskStore + ?Sized>(board: &Board<S>) -> String {
    if board.params().tab == Tab::MentorCalls {
        let notes = board.notes().list();
        let heading = console::style(board.heading()).bold().underlined();
        if notes.is_empty() {
            return format!("{heading}\n\n{EMPTY_NOTES_MESSAGE}");
        }
        return format!("{heading}\n\n{}", render_list("note", note_table(notes), notes.len()));
    }
    TaskListOutput::from_board(board).await.to_human()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteTaskStore};
    use chrono::NaiveDate;
    use std::sync::Arc;

    async fn board() -> Board<SqliteTaskStore> {
        let store = SqliteTaskStore::new(create_migrated_test_pool().await.unwrap());
        let board = Board::with_today(Arc::new(store), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        board.initialize().await.unwrap();
        board
    }

    async fn run_script(board: &mut Board<SqliteTaskStore>, script: &str) -> String {
        let mut out = Vec::new();
        run(board, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_split_line() {
        let mut board = board().await;
        let out = run_script(&mut board, "add \"oops -p low\nadd 'Write report' -p high\n   \n").await;
        assert!(out.contains("error: missing closing quote"));

        let names: Vec<_> = board.tasks().snapshot().await.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Write report"]);
    }

    #[tokio::test]
    async fn test_empty_board_shows_motivational_line() {
        let mut board = board().await;
        let out = run_script(&mut board, "quit\n").await;
        assert!(out.contains(crate::application::EMPTY_VIEW_MESSAGE));
    }

    #[tokio::test]
    async fn test_session_creates_and_completes_tasks() {
        let mut board = board().await;
        let out = run_script(
            &mut board,
            "add \"Write report\" -p high --due 2024-01-10\n\
             add \"Review PR\" -p low --due 2024-01-05\n\
             tab completed\n",
        )
        .await;
        assert!(out.contains("Created task"));

        let review = board.tasks().snapshot().await[1].key.clone();
        run_script(&mut board, &format!("toggle {}\n", review.short())).await;

        board.select_tab(Tab::Completed);
        let names: Vec<_> = board.visible_tasks().await.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Review PR"]);
    }

    #[tokio::test]
    async fn test_validation_errors_do_not_end_session() {
        let mut board = board().await;
        let out = run_script(&mut board, "add \"  \" -p low\nadd Real -p medium\n").await;
        assert!(out.contains("error: Validation failed"));
        assert_eq!(board.tasks().snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_notes_stay_in_session() {
        let mut board = board().await;
        let out = run_script(
            &mut board,
            "note add 2024-01-05 talked about testing\nnote rm 9\ntab mentor-calls\n",
        )
        .await;
        assert!(out.contains("Added note 1"));
        assert!(out.contains("error: Mentor call note not found: 9"));
        assert!(out.contains("Mentor Call Notes"));
        assert_eq!(board.notes().list()[0].description, "talked about testing");
    }

    #[tokio::test]
    async fn test_empty_mentor_tab_message() {
        let mut board = board().await;
        let out = run_script(&mut board, "tab mentor-calls\nnote add 2024-01-05 kickoff\nls\n").await;
        assert_eq!(out.matches(EMPTY_NOTES_MESSAGE).count(), 1);
        assert!(out.contains("kickoff"));
    }

    #[tokio::test]
    async fn test_unknown_command_is_reported() {
        let mut board = board().await;
        let out = run_script(&mut board, "frobnicate\nquit\nadd never -p low\n").await;
        assert!(out.contains("frobnicate"));
        assert!(board.tasks().snapshot().await.is_empty());
    }
}
