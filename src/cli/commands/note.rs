//! `taskboard call-note`: direct access to the stored note endpoint.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use super::open_pool;
use crate::adapters::sqlite::SqliteMentorCallNoteEndpoint;
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::parse_due_date;
use crate::domain::models::{Config, DueDate, StoredNote};
use crate::domain::ports::MentorCallNoteEndpoint;

#[derive(Subcommand, Debug)]
pub enum CallNoteCommands {
    /// Store a mentor call note
    Add {
        /// Call date (YYYY-MM-DD)
        #[arg(value_parser = parse_due_date)]
        date: DueDate,

        /// What was discussed
        description: String,
    },

    /// Delete a stored note by id
    Rm {
        /// Note id
        id: String,
    },
}

#[derive(Debug, Serialize)]
pub struct NoteCreatedOutput {
    pub note: StoredNote,
}

impl CommandOutput for NoteCreatedOutput {
    fn to_human(&self) -> String {
        format!("Stored mentor call note {} for {}", self.note.id, self.note.due_date)
    }
}

#[derive(Debug, Serialize)]
pub struct NoteDeletedOutput {
    pub deleted: String,
}

impl CommandOutput for NoteDeletedOutput {
    fn to_human(&self) -> String {
        format!("Deleted mentor call note {}", self.deleted)
    }
}

pub async fn execute(command: CallNoteCommands, config: &Config, json_mode: bool) -> Result<()> {
    let endpoint = SqliteMentorCallNoteEndpoint::new(open_pool(config).await?);
    match command {
        CallNoteCommands::Add { date, description } => {
            let note = endpoint.create_note(&date, &description).await?;
            tracing::info!(id = %note.id, "mentor call note stored");
            output(&NoteCreatedOutput { note }, json_mode);
        }
        CallNoteCommands::Rm { id } => {
            endpoint.delete_note(&id).await?;
            output(&NoteDeletedOutput { deleted: id }, json_mode);
        }
    }
    Ok(())
}
