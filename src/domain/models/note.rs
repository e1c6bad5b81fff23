//! Mentor call note model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::DueDate;
use crate::domain::errors::{DomainError, DomainResult, FieldError};

/// Session-local sequence number identifying a note.
pub type NoteId = u64;

/// A free-form note recorded after a mentor call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorCallNote {
    pub id: NoteId,
    pub due_date: DueDate,
    pub description: String,
}

/// A note record as held by the store behind the note endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredNote {
    /// Store-assigned id
    pub id: String,
    pub due_date: DueDate,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Check that both note fields are present.
pub fn validate_note(due_date: &DueDate, description: &str) -> DomainResult<()> {
    let mut errors = Vec::new();
    if due_date.as_str().trim().is_empty() {
        errors.push(FieldError::new("due_date", "a call date is required"));
    }
    if description.trim().is_empty() {
        errors.push(FieldError::new("description", "call notes cannot be empty"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}
