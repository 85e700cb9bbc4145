//! CLI runner functions
//!
//! These functions build an engine from configuration and drive it from
//! the terminal.

use std::fmt::Write as FmtWrite;
use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::{BangEngine, HistoryConfig, MemoryHistoryStore, MessageOutcome};
use crate::error::{BangError, Result};
use crate::executor::ShellExecutor;
use crate::ports::{CommandOutput, HistoryStore, SessionContext};
use crate::storage::JsonFileHistoryStore;

/// Build an engine from configuration
///
/// `history_file` overrides `storage.path`; with neither, history lives in
/// memory for the lifetime of the process.
///
/// # Errors
///
/// Returns an error if a history file exists but cannot be loaded.
pub async fn create_engine(config: &Config, history_file: Option<&Path>) -> Result<BangEngine> {
    let history_config = HistoryConfig {
        max_entries: config.history,
    };

    let store: Arc<dyn HistoryStore> = match history_file.or(config.storage.path.as_deref()) {
        Some(path) => {
            info!(path = %path.display(), "Using persistent history");
            Arc::new(JsonFileHistoryStore::open(path, &history_config).await?)
        }
        None => Arc::new(MemoryHistoryStore::new(&history_config)),
    };

    let executor = Arc::new(ShellExecutor::new(config.executor.clone()));
    Ok(BangEngine::new(config, store, executor))
}

/// User-facing text for an error
///
/// Expansion failures render as their plain message; everything else is
/// prefixed so it is distinguishable from command output.
#[must_use]
pub fn render_error(error: &BangError) -> String {
    if error.is_expansion_error() {
        match error {
            BangError::NoHistory { .. } => "No history available.".to_string(),
            BangError::InvalidIndex { .. } => "Invalid index.".to_string(),
            _ => "Command not found.".to_string(),
        }
    } else {
        format!("error: {error}")
    }
}

fn format_output(output: &CommandOutput) -> String {
    let mut result = output.stdout.clone();
    result.push_str(&output.stderr);

    if !output.success() {
        if !result.is_empty() && !result.ends_with('\n') {
            result.push('\n');
        }
        let _ = writeln!(result, "[exit {}]", output.exit_code);
    }

    result
}

/// Handle one line of input, returning what should be shown
async fn handle_line(engine: &BangEngine, session: &SessionContext, line: &str) -> Result<String> {
    match engine.handle_message(session, line).await? {
        MessageOutcome::PassThrough => {
            let output = engine.execute(session, line).await?;
            Ok(format_output(&output))
        }
        MessageOutcome::Printed(command) => Ok(format!("{command}\n")),
        MessageOutcome::Executed { command, output } => {
            // Echo the expansion like an interactive shell does
            Ok(format!("{command}\n{}", format_output(&output)))
        }
    }
}

/// Interactive loop over stdin
///
/// Lines starting with the trigger are expanded; every other line is run
/// as-is. Errors are reported and the loop continues. `exit` or EOF ends it.
///
/// # Errors
///
/// Returns an error if the history file cannot be loaded or stdin fails.
pub async fn run_repl(config: Arc<Config>, session_id: &str) -> Result<()> {
    let engine = create_engine(&config, None).await?;
    let session = SessionContext::new(session_id);

    info!(session = %session_id, trigger = %engine.trigger(), "Interactive session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        match handle_line(&engine, &session, line).await {
            Ok(text) => print!("{text}"),
            Err(e) => {
                debug!(error = ?e, "Line failed");
                eprintln!("{}", render_error(&e));
            }
        }
    }

    Ok(())
}

/// Print the command a message expands to
///
/// Messages that are not bang expressions are printed unchanged.
///
/// # Errors
///
/// Returns the expansion error, or an error loading the history file.
pub async fn run_expand(
    config: Arc<Config>,
    session_id: &str,
    text: &str,
    history_file: Option<&Path>,
) -> Result<()> {
    let engine = create_engine(&config, history_file).await?;

    match engine.expand(session_id, text).await? {
        Some(command) => println!("{command}"),
        None => println!("{text}"),
    }

    Ok(())
}

/// Show the most recent commands of a session with their `!n` indexes
///
/// # Errors
///
/// Returns an error if the history file cannot be loaded.
pub async fn run_history(
    config: Arc<Config>,
    session_id: &str,
    limit: usize,
    history_file: Option<&Path>,
) -> Result<()> {
    let engine = create_engine(&config, history_file).await?;

    let Some(record) = engine.history(session_id).await?.filter(|r| !r.is_empty()) else {
        println!("No command history for session '{session_id}'.");
        return Ok(());
    };

    println!("Command History for '{session_id}' (oldest first):");
    println!("{:-<80}", "");

    let skip = record.len().saturating_sub(limit);
    for (i, command) in record.commands.iter().enumerate().skip(skip) {
        println!("{:>5}  {command}", i + 1);
    }

    Ok(())
}
