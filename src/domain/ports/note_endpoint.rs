use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{DueDate, StoredNote};

/// Boundary endpoint for persisted mentor call notes.
///
/// The session notes store does not call this; it is a separate collaborator.
#[async_trait]
pub trait MentorCallNoteEndpoint: Send + Sync {
    async fn create_note(&self, due_date: &DueDate, description: &str) -> DomainResult<StoredNote>;

    /// Fails with `NoteNotFound` if no note has this id.
    async fn delete_note(&self, id: &str) -> DomainResult<()>;
}
