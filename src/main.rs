use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bang_history::Config;
use bang_history::cli::{Cli, Commands, run_expand, run_history, run_repl};
use bang_history::config::{default_config_path, load_config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries command output, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // An explicit --config must exist; the default location is optional
    let config = match cli.config {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration");
            load_config(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => {
            let path = default_config_path();
            if path.exists() {
                info!(config = %path.display(), "Loading configuration");
                load_config(&path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?
            } else {
                debug!(config = %path.display(), "No config file, using defaults");
                Config::default()
            }
        }
    };

    let config = Arc::new(config);

    debug!(
        history = config.history,
        bang = %config.bang,
        shell = %config.executor.shell,
        "Configuration loaded"
    );

    match cli.command {
        None | Some(Commands::Repl) => {
            run_repl(config, &cli.session).await?;
        }
        Some(Commands::Expand { text, history_file }) => {
            run_expand(config, &cli.session, &text, history_file.as_deref()).await?;
        }
        Some(Commands::History {
            limit,
            history_file,
        }) => {
            run_history(config, &cli.session, limit, history_file.as_deref()).await?;
        }
    }

    Ok(())
}
