pub mod init;
pub mod note;
pub mod shell;
pub mod task;

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::adapters::sqlite::{initialize_database, SqliteTaskStore};
use crate::application::Board;
use crate::domain::models::Config;

/// Open (and migrate) the configured database.
pub async fn open_pool(config: &Config) -> Result<SqlitePool> {
    initialize_database(&config.database)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.path))
}

/// A board over the configured store with the initial load done.
pub async fn open_board(config: &Config) -> Result<Board<SqliteTaskStore>> {
    let pool = open_pool(config).await?;
    let board = Board::new(Arc::new(SqliteTaskStore::new(pool)));
    board.initialize().await.context("Failed to load tasks")?;
    Ok(board)
}
