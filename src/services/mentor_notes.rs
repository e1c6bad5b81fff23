//! Session-local mentor call notes.
//!
//! Notes live only for the lifetime of the session. No persistence call is
//! made from here; the boundary note endpoint is a separate collaborator.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{validate_note, DueDate, MentorCallNote, NoteId};

#[derive(Debug)]
pub struct MentorCallNotes {
    notes: Vec<MentorCallNote>,
    next_id: NoteId,
}

impl Default for MentorCallNotes {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            next_id: 1,
        }
    }
}

impl MentorCallNotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note under a fresh id. Both fields are required.
    pub fn create(&mut self, due_date: DueDate, description: impl Into<String>) -> DomainResult<&MentorCallNote> {
        let description = description.into();
        validate_note(&due_date, &description)?;

        let id = self.next_id;
        self.next_id += 1;
        self.notes.push(MentorCallNote {
            id,
            due_date,
            description: description.trim().to_string(),
        });
        tracing::debug!(id, "mentor call note added");
        Ok(&self.notes[self.notes.len() - 1])
    }

    /// Replace the note with this id, keeping its position.
    pub fn edit(
        &mut self,
        id: NoteId,
        due_date: DueDate,
        description: impl Into<String>,
    ) -> DomainResult<&MentorCallNote> {
        let description = description.into();
        validate_note(&due_date, &description)?;

        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))?;
        note.due_date = due_date;
        note.description = description.trim().to_string();
        Ok(&*note)
    }

    pub fn delete(&mut self, id: NoteId) -> DomainResult<MentorCallNote> {
        let idx = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))?;
        Ok(self.notes.remove(idx))
    }

    pub fn get(&self, id: NoteId) -> Option<&MentorCallNote> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Notes in creation order.
    pub fn list(&self) -> &[MentorCallNote] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
