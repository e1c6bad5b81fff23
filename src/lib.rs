//! Taskboard - personal task tracker
//!
//! Tasks are created, edited, completed and deleted through a store; an
//! in-memory engine mirrors exactly what the store has confirmed, and every
//! list the user sees is derived from that engine by a pure view pipeline.
//! A separate tab holds mentor call notes for the current session.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, ports and errors
//! - **Adapters** (`adapters`): `SQLite` implementations of the ports
//! - **Service Layer** (`services`): task engine, mutation dispatcher, view derivation, session notes
//! - **Application Layer** (`application`): the interactive board session
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskboard::adapters::sqlite::{initialize_database, SqliteTaskStore};
//! use taskboard::application::Board;
//! use taskboard::domain::models::{DatabaseConfig, Priority, TaskDraft};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let pool = initialize_database(&DatabaseConfig::default()).await?;
//! let board = Board::new(Arc::new(SqliteTaskStore::new(pool)));
//! board.initialize().await?;
//! board
//!     .tasks()
//!     .create(TaskDraft::new("Write report").with_priority(Priority::High))
//!     .await?;
//! let rows = board.visible_tasks().await;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::Board;
pub use domain::errors::{DomainError, DomainResult, ErrorKind};
pub use domain::models::{
    Config, DatabaseConfig, DueDate, LoggingConfig, MentorCallNote, Priority, SortMode, StatusFilter, Tab,
    Task, TaskDraft, TaskKey, TaskPatch, ViewParameters,
};
pub use domain::ports::{MentorCallNoteEndpoint, TaskStore};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{derive_view, MutationDispatcher, TaskEngine};
