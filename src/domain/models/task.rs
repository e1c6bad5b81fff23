//! Task domain model.
//!
//! Tasks are the user's to-do items. A task only exists in the authoritative
//! collection once the store has confirmed it and assigned its key.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult, FieldError};

/// Store-assigned identity of a task.
///
/// Keys are opaque strings; the client never generates one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// First eight characters, for compact display.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map_or(self.0.len(), |(idx, _)| idx);
        &self.0[..end]
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Priority level for tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Capitalized label as shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A due date as entered by the user or held by the store.
///
/// The raw text is kept so that values the store holds but which do not parse
/// as a date survive a round trip; such dates count as absent for ordering and
/// for the Today view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(String);

impl DueDate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar date, if the raw value is a `YYYY-MM-DD` date or an RFC 3339
    /// timestamp.
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.0.trim();
        if raw.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }

    pub fn is_valid(&self) -> bool {
        self.date().is_some()
    }
}

impl From<NaiveDate> for DueDate {
    fn from(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }
}

impl From<&str> for DueDate {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A to-do item confirmed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned key
    pub key: TaskKey,
    /// Short name, never blank
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Optional due date
    pub due_date: Option<DueDate>,
    /// Priority
    pub priority: Priority,
    /// Completion flag
    pub completed: bool,
    /// When the store created the record
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Merge a partial update into this task. Fields absent from the patch
    /// are left untouched.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(due_date) = &patch.due_date {
            self.due_date.clone_from(due_date);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }

    /// Build the patch that turns `self` into `edited`, carrying only the
    /// fields that differ.
    pub fn diff(&self, edited: &TaskDraft) -> TaskPatch {
        let mut patch = TaskPatch::default();
        if edited.name != self.name {
            patch.name = Some(edited.name.clone());
        }
        if edited.description != self.description {
            patch.description = Some(edited.description.clone());
        }
        if edited.due_date != self.due_date {
            patch.due_date = Some(edited.due_date.clone());
        }
        if let Some(priority) = edited.priority {
            if priority != self.priority {
                patch.priority = Some(priority);
            }
        }
        patch
    }

    /// Pre-filled draft for editing this task.
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            due_date: self.due_date.clone(),
            priority: Some(self.priority),
        }
    }
}

/// User input for a new task, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub due_date: Option<DueDate>,
    /// `None` until the user picks one
    pub priority: Option<Priority>,
}

impl TaskDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<DueDate>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Check required fields and produce the create request.
    ///
    /// Every failing field is reported, not just the first.
    pub fn validate(&self) -> DomainResult<NewTask> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "task name is required"));
        }
        if self.priority.is_none() {
            errors.push(FieldError::new("priority", "a priority must be chosen"));
        }
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        Ok(NewTask {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            due_date: self.due_date.clone(),
            priority: self.priority.unwrap_or(Priority::Low),
        })
    }
}

/// A validated create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub due_date: Option<DueDate>,
    pub priority: Priority,
}

/// Partial field replacement for an existing task.
///
/// `None` leaves a field untouched. For the due date, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DueDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.completed.is_none()
    }

    /// Reject patches that would break a task invariant.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::Validation(vec![FieldError::new(
                    "name",
                    "task name cannot be blank",
                )]));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            key: TaskKey::new("65a1f0c2"),
            name: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            due_date: Some(DueDate::new("2024-01-10")),
            priority: Priority::High,
            completed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_priority_round_trip_labels() {
        assert_eq!(Priority::from_str("Medium"), Some(Priority::Medium));
        assert_eq!(Priority::from_str(" HIGH "), Some(Priority::High));
        assert_eq!(Priority::from_str("urgent"), None);
        assert_eq!(Priority::Low.label(), "Low");
        assert_eq!(Priority::High.as_str(), "high");
    }

    #[test]
    fn test_due_date_parsing() {
        assert_eq!(
            DueDate::new("2024-01-05").date(),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            DueDate::new("2024-01-05T10:30:00Z").date(),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert!(DueDate::new("next tuesday").date().is_none());
        assert!(DueDate::new("").date().is_none());
    }

    #[test]
    fn test_draft_validation_reports_every_field() {
        let err = TaskDraft::new("   ").validate().unwrap_err();
        match err {
            DomainError::Validation(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field).collect();
                assert_eq!(names, vec!["name", "priority"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_draft_validation_trims_name() {
        let new_task = TaskDraft::new("  Review PR ")
            .with_priority(Priority::Low)
            .validate()
            .unwrap();
        assert_eq!(new_task.name, "Review PR");
        assert_eq!(new_task.priority, Priority::Low);
        assert!(new_task.due_date.is_none());
    }

    #[test]
    fn test_apply_patch_leaves_unspecified_fields() {
        let mut task = sample_task();
        task.apply_patch(&TaskPatch {
            priority: Some(Priority::Low),
            due_date: Some(None),
            ..Default::default()
        });

        assert_eq!(task.priority, Priority::Low);
        assert!(task.due_date.is_none());
        assert_eq!(task.name, "Write report");
        assert_eq!(task.description, "Quarterly numbers");
        assert!(!task.completed);
    }

    #[test]
    fn test_diff_only_carries_changes() {
        let task = sample_task();
        let mut draft = task.to_draft();
        assert!(task.diff(&draft).is_empty());

        draft.name = "Write final report".to_string();
        let patch = task.diff(&draft);
        assert_eq!(patch.name.as_deref(), Some("Write final report"));
        assert!(patch.description.is_none());
        assert!(patch.priority.is_none());
    }

    #[test]
    fn test_patch_rejects_blank_name() {
        let patch = TaskPatch {
            name: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(DomainError::Validation(_))));
        assert!(TaskPatch::completed(true).validate().is_ok());
    }

    #[test]
    fn test_key_short() {
        let key = TaskKey::new("0f8fad5b-d9cb-469f-a165-70867728950e");
        assert_eq!(key.short(), "0f8fad5b");
        assert_eq!(TaskKey::new("abc").short(), "abc");
        assert!(TaskKey::new("  ").is_empty());
    }
}
