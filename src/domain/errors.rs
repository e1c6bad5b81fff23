//! Domain errors for the taskboard system.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::domain::models::TaskKey;

/// A single failing input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Domain-level errors that can occur in the taskboard system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskKey),

    #[error("Mentor call note not found: {0}")]
    NoteNotFound(String),

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Duplicate task key: {0}")]
    DuplicateKey(TaskKey),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Coarse classification used when reporting a failure to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Transport,
    DuplicateKey,
}

impl ErrorKind {
    /// Status code at the store boundary: 400 for bad input, 404 for a
    /// missing resource, 500 for anything unexpected.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound => 404,
            Self::Transport | Self::DuplicateKey => 500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Transport => "transport",
            Self::DuplicateKey => "duplicate_key",
        }
    }
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::TaskNotFound(_) | Self::NoteNotFound(_) => ErrorKind::NotFound,
            Self::TransportFailure(_) => ErrorKind::Transport,
            Self::DuplicateKey(_) => ErrorKind::DuplicateKey,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Field-level detail for validation failures, empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(fields) => fields,
            _ => &[],
        }
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::TransportFailure(err.to_string())
    }
}
