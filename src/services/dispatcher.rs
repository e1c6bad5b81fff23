//! Mutation dispatcher: the only writer into the task engine.
//!
//! Every mutation is validated locally, sent to the store, and mirrored into
//! the engine only after the store confirms it. A failed call leaves the
//! engine exactly as it was and is returned to the caller; nothing is retried.
//!
//! Mutations that target the same key are run one at a time in the order they
//! were issued. Mutations on different keys proceed independently.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::instrument;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Task, TaskDraft, TaskKey, TaskPatch};
use crate::domain::ports::TaskStore;
use crate::services::task_engine::{Applied, ConfirmedMutation, TaskEngine};

/// Shared handle to the authoritative collection.
pub type SharedEngine = Arc<RwLock<TaskEngine>>;

/// Per-key FIFO queues. `tokio::sync::Mutex` grants the lock in request
/// order, so holding a key's mutex for the whole round trip serializes
/// mutations on that key.
#[derive(Default)]
struct KeyQueues {
    queues: Mutex<HashMap<TaskKey, Arc<Mutex<()>>>>,
}

impl KeyQueues {
    async fn enter(&self, key: &TaskKey) -> OwnedMutexGuard<()> {
        let queue = {
            let mut queues = self.queues.lock().await;
            Arc::clone(queues.entry(key.clone()).or_default())
        };
        queue.lock_owned().await
    }

    /// Release the key and drop its queue if nobody else is waiting on it.
    async fn leave(&self, key: &TaskKey, guard: OwnedMutexGuard<()>) {
        drop(guard);
        let mut queues = self.queues.lock().await;
        if queues.get(key).is_some_and(|q| Arc::strong_count(q) == 1) {
            queues.remove(key);
        }
    }

    async fn len(&self) -> usize {
        self.queues.lock().await.len()
    }
}

/// Outcome of clearing completed tasks.
#[derive(Debug, Default)]
pub struct ClearCompletedReport {
    pub removed: Vec<TaskKey>,
    pub failed: Vec<(TaskKey, DomainError)>,
}

pub struct MutationDispatcher<S: TaskStore + ?Sized> {
    store: Arc<S>,
    engine: SharedEngine,
    key_queues: KeyQueues,
    next_seq: AtomicU64,
}

impl<S: TaskStore + ?Sized> MutationDispatcher<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_engine(store, Arc::new(RwLock::new(TaskEngine::new())))
    }

    pub fn with_engine(store: Arc<S>, engine: SharedEngine) -> Self {
        Self {
            store,
            engine,
            key_queues: KeyQueues::default(),
            next_seq: AtomicU64::new(1),
        }
    }

    /// Handle for readers (view derivation). Readers must not write through it.
    pub fn engine(&self) -> SharedEngine {
        Arc::clone(&self.engine)
    }

    /// Copy of the authoritative collection, in insertion order.
    pub async fn snapshot(&self) -> Vec<Task> {
        self.engine.read().await.tasks().to_vec()
    }

    /// Initial bulk fetch. Until this succeeds, views derive from an empty
    /// collection.
    #[instrument(skip(self))]
    pub async fn load(&self) -> DomainResult<usize> {
        let tasks = match self.store.list_tasks().await {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::warn!(error = %err, "initial task load failed");
                return Err(err);
            }
        };
        let mut engine = self.engine.write().await;
        let count = engine.load_all(tasks)?;
        tracing::info!(count, "tasks loaded");
        Ok(count)
    }

    /// Validate the draft, create it in the store, then insert the confirmed
    /// record. No placeholder entry is ever added.
    #[instrument(skip(self, draft), fields(seq = self.seq(), name = %draft.name))]
    pub async fn create(&self, draft: TaskDraft) -> DomainResult<Task> {
        let new_task = draft.validate()?;

        let created = match self.store.create_task(&new_task).await {
            Ok(task) => task,
            Err(err) => {
                tracing::warn!(error = %err, "create failed");
                return Err(err);
            }
        };

        if let Err(err) = self
            .engine
            .write()
            .await
            .apply_confirmed(ConfirmedMutation::Created(created.clone()))
        {
            tracing::error!(key = %created.key, error = %err, "store confirmed a create the engine could not mirror");
            return Err(err);
        }

        tracing::info!(key = %created.key, "task created");
        Ok(created)
    }

    /// Send the changed fields to the store and mirror them once confirmed.
    #[instrument(skip(self, patch), fields(seq = self.seq(), key = %key))]
    pub async fn update(&self, key: &TaskKey, mut patch: TaskPatch) -> DomainResult<Task> {
        patch.validate()?;
        if let Some(name) = patch.name.as_mut() {
            *name = name.trim().to_string();
        }

        let guard = self.key_queues.enter(key).await;
        let result = self.update_confirmed(key, patch).await;
        self.key_queues.leave(key, guard).await;
        result
    }

    /// Edit starting from the task's current values: only fields that differ
    /// from the engine's copy are sent. An edit that changes nothing makes no
    /// store call.
    #[instrument(skip(self, edited), fields(seq = self.seq(), key = %key))]
    pub async fn edit(&self, key: &TaskKey, mut edited: TaskDraft) -> DomainResult<Task> {
        edited.name = edited.validate()?.name;

        let guard = self.key_queues.enter(key).await;
        let result = async {
            let current = self
                .engine
                .read()
                .await
                .get(key)
                .cloned()
                .ok_or_else(|| DomainError::TaskNotFound(key.clone()))?;
            let patch = current.diff(&edited);
            if patch.is_empty() {
                tracing::debug!("edit changed no fields");
                return Ok(current);
            }
            self.update_confirmed(key, patch).await
        }
        .await;
        self.key_queues.leave(key, guard).await;
        result
    }

    async fn update_confirmed(&self, key: &TaskKey, patch: TaskPatch) -> DomainResult<Task> {
        let stored = match self.store.update_task(key, &patch).await {
            Ok(task) => task,
            Err(err) => {
                tracing::warn!(error = %err, "update failed");
                return Err(err);
            }
        };

        let mut engine = self.engine.write().await;
        match engine.apply_confirmed(ConfirmedMutation::Updated { key: key.clone(), patch }) {
            Ok(_) => {
                tracing::info!("task updated");
                Ok(engine.get(key).cloned().unwrap_or(stored))
            }
            Err(err) if err.is_not_found() => {
                tracing::warn!("store updated a task missing from the engine");
                Ok(stored)
            }
            Err(err) => Err(err),
        }
    }

    /// Persist the flipped completion flag, then mirror it.
    #[instrument(skip(self), fields(seq = self.seq(), key = %key))]
    pub async fn toggle_complete(&self, key: &TaskKey) -> DomainResult<bool> {
        let guard = self.key_queues.enter(key).await;
        let result = self.toggle_confirmed(key).await;
        self.key_queues.leave(key, guard).await;
        result
    }

    async fn toggle_confirmed(&self, key: &TaskKey) -> DomainResult<bool> {
        let current = self
            .engine
            .read()
            .await
            .get(key)
            .map(|t| t.completed)
            .ok_or_else(|| DomainError::TaskNotFound(key.clone()))?;

        if let Err(err) = self.store.update_task(key, &TaskPatch::completed(!current)).await {
            tracing::warn!(error = %err, "toggle failed");
            return Err(err);
        }

        let mut engine = self.engine.write().await;
        let completed = match engine.apply_confirmed(ConfirmedMutation::CompletionToggled(key.clone()))? {
            Applied::Toggled(value) => value,
            _ => !current,
        };
        tracing::info!(completed, "task completion toggled");
        Ok(completed)
    }

    /// Delete in the store, then drop the entry. A store `TaskNotFound` is
    /// returned to the caller and the engine is left as is.
    #[instrument(skip(self), fields(seq = self.seq(), key = %key))]
    pub async fn delete(&self, key: &TaskKey) -> DomainResult<()> {
        let guard = self.key_queues.enter(key).await;
        let result = self.delete_confirmed(key).await;
        self.key_queues.leave(key, guard).await;
        result
    }

    async fn delete_confirmed(&self, key: &TaskKey) -> DomainResult<()> {
        if let Err(err) = self.store.delete_task(key).await {
            tracing::warn!(error = %err, "delete failed");
            return Err(err);
        }

        match self
            .engine
            .write()
            .await
            .apply_confirmed(ConfirmedMutation::Deleted(key.clone()))
        {
            Ok(_) => tracing::info!("task deleted"),
            // Already gone locally; the store is what matters.
            Err(err) if err.is_not_found() => tracing::debug!("deleted task was not in the engine"),
            Err(err) => return Err(err),
        }
        Ok(())
    }

    /// Delete every completed task. Each delete is confirmed on its own, so a
    /// partial failure removes exactly the tasks the store accepted.
    ///
    /// Completion is checked again once the key's queue is entered; a task
    /// reopened by a mutation queued ahead of the delete is kept.
    #[instrument(skip(self))]
    pub async fn clear_completed(&self) -> ClearCompletedReport {
        let keys = self.engine.read().await.completed_keys();
        let outcomes = join_all(keys.into_iter().map(|key| async move {
            let guard = self.key_queues.enter(&key).await;
            let still_completed = self.engine.read().await.get(&key).is_some_and(|t| t.completed);
            let result = if still_completed {
                Some(self.delete_confirmed(&key).await)
            } else {
                tracing::debug!(key = %key, "task no longer completed, kept");
                None
            };
            self.key_queues.leave(&key, guard).await;
            (key, result)
        }))
        .await;

        let mut report = ClearCompletedReport::default();
        for (key, result) in outcomes {
            match result {
                Some(Ok(())) => report.removed.push(key),
                Some(Err(err)) => report.failed.push((key, err)),
                None => {}
            }
        }
        tracing::info!(removed = report.removed.len(), failed = report.failed.len(), "cleared completed tasks");
        report
    }

    /// Number of keys with a mutation in flight or queued.
    pub async fn pending_keys(&self) -> usize {
        self.key_queues.len().await
    }

    fn seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }
}
