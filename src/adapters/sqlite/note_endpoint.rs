//! SQLite implementation of the MentorCallNoteEndpoint.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{format_datetime, now};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{validate_note, DueDate, StoredNote};
use crate::domain::ports::MentorCallNoteEndpoint;

#[derive(Clone)]
pub struct SqliteMentorCallNoteEndpoint {
    pool: SqlitePool,
}

impl SqliteMentorCallNoteEndpoint {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MentorCallNoteEndpoint for SqliteMentorCallNoteEndpoint {
    async fn create_note(&self, due_date: &DueDate, description: &str) -> DomainResult<StoredNote> {
        validate_note(due_date, description)?;

        let id = Uuid::new_v4().to_string();
        let now = now();

        sqlx::query("INSERT INTO mentor_call_notes (id, due_date, description, created_at) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(due_date.as_str())
            .bind(description)
            .bind(format_datetime(&now))
            .execute(&self.pool)
            .await?;

        Ok(StoredNote {
            id,
            due_date: due_date.clone(),
            description: description.to_string(),
            created_at: now,
        })
    }

    async fn delete_note(&self, id: &str) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM mentor_call_notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NoteNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn stored_count(pool: &SqlitePool, id: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM mentor_call_notes WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_delete_note() {
        let endpoint = SqliteMentorCallNoteEndpoint::new(create_migrated_test_pool().await.unwrap());

        let note = endpoint
            .create_note(&DueDate::new("2024-02-01"), "Discussed career goals")
            .await
            .unwrap();
        assert_eq!(stored_count(&endpoint.pool, &note.id).await, 1);

        endpoint.delete_note(&note.id).await.unwrap();
        assert_eq!(stored_count(&endpoint.pool, &note.id).await, 0);

        let err = endpoint.delete_note(&note.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NoteNotFound(_)));
    }

    #[tokio::test]
    async fn test_create_requires_both_fields() {
        let endpoint = SqliteMentorCallNoteEndpoint::new(create_migrated_test_pool().await.unwrap());
        let err = endpoint.create_note(&DueDate::new(""), "").await.unwrap_err();
        assert_eq!(err.field_errors().len(), 2);
    }
}
