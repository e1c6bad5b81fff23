pub mod commands;
pub mod display;
pub mod id_resolver;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use anyhow::Result;

use crate::domain::models::Config;

/// Run one parsed command against the loaded configuration.
pub async fn run(command: Commands, config: &Config, json_mode: bool) -> Result<()> {
    match command {
        Commands::Init(args) => commands::init::execute(args, config, json_mode).await,
        Commands::Add(args) => commands::task::add(args, config, json_mode).await,
        Commands::List(args) => commands::task::list(args, config, json_mode).await,
        Commands::Edit(args) => commands::task::edit(args, config, json_mode).await,
        Commands::Toggle(args) => commands::task::toggle(args, config, json_mode).await,
        Commands::Rm(args) => commands::task::remove(args, config, json_mode).await,
        Commands::ClearCompleted => commands::task::clear_completed(config, json_mode).await,
        Commands::CallNote(command) => commands::note::execute(command, config, json_mode).await,
        Commands::Shell => commands::shell::execute(config).await,
    }
}

/// Report a failed command and return the process exit code.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> i32 {
    tracing::debug!(error = ?err, "command failed");
    if json_mode {
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&output::error_json(err)).unwrap_or_default()
        );
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    1
}
