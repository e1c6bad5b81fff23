//! Taskboard CLI entry point.

use anyhow::Result;
use clap::Parser;

use taskboard::cli::{handle_error, Cli};
use taskboard::domain::models::Config;
use taskboard::infrastructure::config::ConfigLoader;
use taskboard::infrastructure::logging::{LogConfig, LoggerImpl};

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => std::process::exit(handle_error(&err, cli.json)),
    };

    // Held for the whole run so buffered file logs are flushed on exit.
    let logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            None
        }
    };

    if let Err(err) = taskboard::cli::run(cli.command, &config, cli.json).await {
        let code = handle_error(&err, cli.json);
        drop(logger);
        std::process::exit(code);
    }
}
