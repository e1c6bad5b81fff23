//! Implementation of the `taskboard init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::adapters::sqlite::{initialize_database, verify_connection};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, DatabaseConfig};
use crate::infrastructure::config::{ConfigLoader, CONFIG_DIR};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Rewrite the configuration file even if it already exists
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub initialized_path: PathBuf,
    pub config_written: bool,
    pub database_path: PathBuf,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if self.config_written {
            lines.push(format!("\nWrote {CONFIG_DIR}/config.yaml"));
        }
        if self.success {
            lines.push(format!("Database ready at {}", self.database_path.display()));
        }
        lines.join("\n")
    }
}

pub async fn execute(args: InitArgs, config: &Config, json_mode: bool) -> Result<()> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };
    let result = initialize(&target_path, config, args.force).await?;
    output(&result, json_mode);
    Ok(())
}

/// Create the project directory, write the default config and migrate the
/// database. Existing task data is never removed.
pub async fn initialize(target_path: &Path, config: &Config, force: bool) -> Result<InitOutput> {
    let config_dir = target_path.join(CONFIG_DIR);
    let config_file = config_dir.join("config.yaml");
    let already_initialized = config_file.exists();

    fs::create_dir_all(&config_dir)
        .await
        .with_context(|| format!("Failed to create {}", config_dir.display()))?;

    let config_written = !already_initialized || force;
    if config_written {
        fs::write(&config_file, ConfigLoader::default_yaml()?)
            .await
            .with_context(|| format!("Failed to write {}", config_file.display()))?;
    }

    let database_path = resolve_database_path(target_path, &config.database.path);
    let database = DatabaseConfig {
        path: database_path.to_string_lossy().into_owned(),
        ..config.database.clone()
    };
    let pool = initialize_database(&database)
        .await
        .context("Failed to initialize database")?;
    verify_connection(&pool)
        .await
        .context("Database is not reachable after migration")?;
    pool.close().await;

    let message = match (already_initialized, force) {
        (false, _) => "Project initialized successfully.",
        (true, true) => "Project reinitialized successfully.",
        (true, false) => "Project already initialized; database is up to date. Use --force to rewrite the config.",
    };

    Ok(InitOutput {
        success: true,
        message: message.to_string(),
        initialized_path: target_path.to_path_buf(),
        config_written,
        database_path,
    })
}

fn resolve_database_path(target_path: &Path, configured: &str) -> PathBuf {
    let configured = configured.strip_prefix("sqlite:").unwrap_or(configured);
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        target_path.join(path)
    }
}
