//! CLI module for direct command-line usage
//!
//! This module provides a small interactive shell around the expansion
//! engine, plus one-shot commands to expand or list persisted history.

mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use runner::{create_engine, render_error, run_expand, run_history, run_repl};

/// bang-history - shell-style history expansion for command sessions
#[derive(Parser)]
#[command(name = "bang-history")]
#[command(about = "Re-run earlier commands with !!, !n, !prefix and !?substring")]
#[command(version)]
#[command(after_help = "EXAMPLES:
    # Start an interactive session (default)
    bang-history

    # Resolve an expression against persisted history without running it
    bang-history --session build expand '!?cargo' --history-file ./history.json

    # Show the last 20 commands of a session
    bang-history --session build history --limit 20 --history-file ./history.json")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Session whose history is used
    #[arg(short, long, global = true, default_value = "local")]
    pub session: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Read commands from stdin, expanding bang expressions - same as running without arguments
    Repl,

    /// Print the command a bang expression resolves to, without running it
    Expand {
        /// Message to expand, including the trigger (e.g. "!-2")
        text: String,

        /// History file to read (overrides `storage.path`)
        #[arg(long)]
        history_file: Option<PathBuf>,
    },

    /// Show a session's command history
    History {
        /// Number of most recent entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// History file to read (overrides `storage.path`)
        #[arg(long)]
        history_file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_repl() {
        let cli = Cli::parse_from(["bang-history"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.session, "local");
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_expand_args() {
        let cli = Cli::parse_from([
            "bang-history",
            "expand",
            "!-2",
            "--session",
            "ci",
            "--history-file",
            "/tmp/h.json",
        ]);
        assert_eq!(cli.session, "ci");
        match cli.command {
            Some(Commands::Expand { text, history_file }) => {
                assert_eq!(text, "!-2");
                assert_eq!(history_file, Some(PathBuf::from("/tmp/h.json")));
            }
            _ => panic!("expected expand"),
        }
    }

    #[test]
    fn test_history_limit() {
        let cli = Cli::parse_from(["bang-history", "history", "-l", "5"]);
        assert!(matches!(
            cli.command,
            Some(Commands::History { limit: 5, .. })
        ));
    }
}
