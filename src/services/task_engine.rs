//! Authoritative in-memory mirror of the store's task set.
//!
//! The engine performs no I/O. Every entry it holds carries a key the store
//! has confirmed, and it only changes through the primitives below, which the
//! mutation dispatcher invokes after the store has accepted a mutation.

use std::collections::HashSet;

use crate::domain::errors::{DomainError, DomainResult, FieldError};
use crate::domain::models::{Task, TaskKey, TaskPatch};

/// A store-confirmed change, ready to be mirrored locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmedMutation {
    /// Result of the initial bulk fetch
    Loaded(Vec<Task>),
    /// A newly created record, carrying its store-assigned key
    Created(Task),
    /// Fields the store accepted for an existing record
    Updated { key: TaskKey, patch: TaskPatch },
    /// The record's completion flag was flipped
    CompletionToggled(TaskKey),
    /// The record was deleted
    Deleted(TaskKey),
}

/// Outcome of applying a confirmed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Loaded(usize),
    Inserted,
    Replaced,
    Toggled(bool),
    Removed(Task),
}

#[derive(Debug, Default)]
pub struct TaskEngine {
    tasks: Vec<Task>,
    loaded: bool,
}

impl TaskEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection with the store's listing.
    ///
    /// An empty listing is a valid state. The collection is left untouched if
    /// the listing is malformed (blank or repeated keys).
    pub fn load_all(&mut self, tasks: Vec<Task>) -> DomainResult<usize> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            Self::check_key(&task.key)?;
            if !seen.insert(&task.key) {
                return Err(DomainError::DuplicateKey(task.key.clone()));
            }
        }

        let count = tasks.len();
        self.tasks = tasks;
        self.loaded = true;
        Ok(count)
    }

    /// Append a confirmed task, keeping arrival order.
    pub fn insert(&mut self, task: Task) -> DomainResult<()> {
        Self::check_key(&task.key)?;
        if self.position(&task.key).is_some() {
            return Err(DomainError::DuplicateKey(task.key));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Merge the patch into the entry with this key.
    pub fn replace(&mut self, key: &TaskKey, patch: &TaskPatch) -> DomainResult<&Task> {
        let idx = self.require(key)?;
        let task = &mut self.tasks[idx];
        task.apply_patch(patch);
        Ok(task)
    }

    pub fn remove(&mut self, key: &TaskKey) -> DomainResult<Task> {
        let idx = self.require(key)?;
        Ok(self.tasks.remove(idx))
    }

    /// Flip the completion flag, returning the new value.
    pub fn toggle_completed(&mut self, key: &TaskKey) -> DomainResult<bool> {
        let idx = self.require(key)?;
        let task = &mut self.tasks[idx];
        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Single entry point for mirroring a store-confirmed mutation.
    pub fn apply_confirmed(&mut self, mutation: ConfirmedMutation) -> DomainResult<Applied> {
        let applied = match mutation {
            ConfirmedMutation::Loaded(tasks) => Applied::Loaded(self.load_all(tasks)?),
            ConfirmedMutation::Created(task) => {
                self.insert(task)?;
                Applied::Inserted
            }
            ConfirmedMutation::Updated { key, patch } => {
                self.replace(&key, &patch)?;
                Applied::Replaced
            }
            ConfirmedMutation::CompletionToggled(key) => Applied::Toggled(self.toggle_completed(&key)?),
            ConfirmedMutation::Deleted(key) => Applied::Removed(self.remove(&key)?),
        };
        tracing::debug!(?applied, size = self.tasks.len(), "engine applied confirmed mutation");
        Ok(applied)
    }

    /// Collection in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, key: &TaskKey) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.key == key)
    }

    pub fn contains(&self, key: &TaskKey) -> bool {
        self.position(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether the initial bulk load has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Keys of completed tasks, in collection order.
    pub fn completed_keys(&self) -> Vec<TaskKey> {
        self.tasks
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.key.clone())
            .collect()
    }

    fn position(&self, key: &TaskKey) -> Option<usize> {
        self.tasks.iter().position(|t| &t.key == key)
    }

    fn require(&self, key: &TaskKey) -> DomainResult<usize> {
        self.position(key)
            .ok_or_else(|| DomainError::TaskNotFound(key.clone()))
    }

    fn check_key(key: &TaskKey) -> DomainResult<()> {
        if key.is_empty() {
            return Err(DomainError::Validation(vec![FieldError::new(
                "key",
                "task has no store-assigned key",
            )]));
        }
        Ok(())
    }
}
