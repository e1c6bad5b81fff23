//! SQLite implementation of the TaskStore.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use super::{format_datetime, now, parse_datetime};
use crate::domain::errors::{DomainError, DomainResult, FieldError};
use crate::domain::models::{DueDate, NewTask, Priority, Task, TaskKey, TaskPatch};
use crate::domain::ports::TaskStore;

const TASK_COLUMNS: &str = "id, name, description, due_date, priority, completed, created_at";

#[derive(Clone)]
pub struct SqliteTaskStore {
    pool: SqlitePool,
}

impl SqliteTaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, key: &TaskKey) -> DomainResult<Option<Task>> {
        let row: Option<TaskRow> = sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Task::try_from).transpose()
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn create_task(&self, task: &NewTask) -> DomainResult<Task> {
        if task.name.trim().is_empty() {
            return Err(DomainError::Validation(vec![FieldError::new(
                "name",
                "task name is required",
            )]));
        }

        let key = TaskKey::new(Uuid::new_v4().to_string());
        let now = now();

        sqlx::query(
            r#"INSERT INTO tasks (id, name, description, due_date, priority, completed, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, 0, ?, ?)"#
        )
        .bind(key.as_str())
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.due_date.as_ref().map(DueDate::as_str))
        .bind(task.priority.as_str())
        .bind(format_datetime(&now))
        .bind(format_datetime(&now))
        .execute(&self.pool)
        .await?;

        Ok(Task {
            key,
            name: task.name.clone(),
            description: task.description.clone(),
            due_date: task.due_date.clone(),
            priority: task.priority,
            completed: false,
            created_at: now,
        })
    }

    async fn list_tasks(&self) -> DomainResult<Vec<Task>> {
        let rows: Vec<TaskRow> =
            sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at, rowid"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn update_task(&self, key: &TaskKey, patch: &TaskPatch) -> DomainResult<Task> {
        patch.validate()?;

        if patch.is_empty() {
            return self
                .fetch(key)
                .await?
                .ok_or_else(|| DomainError::TaskNotFound(key.clone()));
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE tasks SET updated_at = ");
        query.push_bind(format_datetime(&now()));
        if let Some(name) = &patch.name {
            query.push(", name = ").push_bind(name.trim().to_string());
        }
        if let Some(description) = &patch.description {
            query.push(", description = ").push_bind(description.clone());
        }
        if let Some(due_date) = &patch.due_date {
            query
                .push(", due_date = ")
                .push_bind(due_date.as_ref().map(|d| d.as_str().to_string()));
        }
        if let Some(priority) = patch.priority {
            query.push(", priority = ").push_bind(priority.as_str());
        }
        if let Some(completed) = patch.completed {
            query.push(", completed = ").push_bind(completed);
        }
        query.push(" WHERE id = ").push_bind(key.as_str().to_string());

        let result = query.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::TaskNotFound(key.clone()));
        }

        self.fetch(key)
            .await?
            .ok_or_else(|| DomainError::TaskNotFound(key.clone()))
    }

    async fn delete_task(&self, key: &TaskKey) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(key.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TaskNotFound(key.clone()));
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: String,
    name: String,
    description: String,
    due_date: Option<String>,
    priority: String,
    completed: bool,
    created_at: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = DomainError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let priority = Priority::from_str(&row.priority)
            .ok_or_else(|| DomainError::TransportFailure(format!("Invalid priority: {}", row.priority)))?;

        Ok(Task {
            key: TaskKey::new(row.id),
            name: row.name,
            description: row.description,
            due_date: row.due_date.filter(|d| !d.is_empty()).map(DueDate::new),
            priority,
            completed: row.completed,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}
