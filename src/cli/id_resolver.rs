//! Short key prefix resolution for CLI task commands.
//!
//! Allows users to specify any unique prefix of a task key instead of the
//! full key, similar to git short hashes. Resolution runs against the loaded
//! task collection.

use crate::domain::errors::{DomainError, DomainResult, FieldError};
use crate::domain::models::{Task, TaskKey};

/// Resolve a task key prefix to the full key.
///
/// No match is `TaskNotFound`; an empty or ambiguous prefix is a validation
/// error on the `key` field.
pub fn resolve_task_key(tasks: &[Task], prefix: &str) -> DomainResult<TaskKey> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Err(key_error("task key prefix must not be empty"));
    }

    // Fast path: exact match
    if let Some(task) = tasks.iter().find(|t| t.key.as_str() == prefix) {
        return Ok(task.key.clone());
    }

    let matches: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.key.as_str().starts_with(prefix))
        .collect();

    match matches.as_slice() {
        [] => Err(DomainError::TaskNotFound(TaskKey::new(prefix))),
        [only] => Ok(only.key.clone()),
        many => {
            let mut msg = format!("ambiguous prefix '{prefix}' matches {} tasks:", many.len());
            for task in many {
                msg.push_str(&format!("\n  {}  {}", task.key, task.name));
            }
            Err(key_error(msg))
        }
    }
}

fn key_error(message: impl Into<String>) -> DomainError {
    DomainError::Validation(vec![FieldError::new("key", message)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Priority;
    use chrono::Utc;

    fn task(key: &str) -> Task {
        Task {
            key: TaskKey::new(key),
            name: format!("task {key}"),
            description: String::new(),
            due_date: None,
            priority: Priority::Low,
            completed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_resolves_unique_prefix() {
        let tasks = vec![task("a1b2"), task("c3d4")];
        assert_eq!(resolve_task_key(&tasks, "a1").unwrap(), TaskKey::new("a1b2"));
        assert_eq!(resolve_task_key(&tasks, "c3d4").unwrap(), TaskKey::new("c3d4"));
    }

    #[test]
    fn test_exact_match_beats_longer_keys() {
        let tasks = vec![task("ab"), task("abc")];
        assert_eq!(resolve_task_key(&tasks, "ab").unwrap(), TaskKey::new("ab"));
    }

    #[test]
    fn test_ambiguous_and_missing() {
        let tasks = vec![task("abc1"), task("abc2")];
        let err = resolve_task_key(&tasks, "abc").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.field_errors()[0].field, "key");
        assert!(err.to_string().contains("ambiguous"));

        let err = resolve_task_key(&tasks, "zzz").unwrap_err();
        assert!(matches!(err, DomainError::TaskNotFound(ref k) if k.as_str() == "zzz"));
        assert_eq!(resolve_task_key(&tasks, "  ").unwrap_err().status_code(), 400);
    }
}
