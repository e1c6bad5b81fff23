use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{NewTask, Task, TaskKey, TaskPatch};

/// Persistence port for tasks.
///
/// The store owns key assignment: `create_task` returns the record carrying
/// its freshly assigned key.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persist a new task and return it with its store-assigned key.
    ///
    /// Fails with `Validation` if a required field is missing.
    async fn create_task(&self, task: &NewTask) -> DomainResult<Task>;

    /// All tasks, in creation order.
    async fn list_tasks(&self) -> DomainResult<Vec<Task>>;

    /// Replace the given fields and return the updated record.
    ///
    /// Fails with `TaskNotFound` if the key is unknown.
    async fn update_task(&self, key: &TaskKey, patch: &TaskPatch) -> DomainResult<Task>;

    /// Delete by key. Fails with `TaskNotFound` if the key is unknown.
    async fn delete_task(&self, key: &TaskKey) -> DomainResult<()>;
}
