//! Dispatch of resolved commands
//!
//! Every command that reaches the executor passes through the history write
//! hook first, whether it was typed directly or produced by an expansion.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::ports::{CommandExecutor, CommandOutput, HistoryStore, SessionContext};

/// Final state of a handled message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Not for us: no trigger, or a body that is not an expression
    PassThrough,
    /// `:p` was given; the resolved command is returned instead of run
    Printed(String),
    /// The resolved command was run
    Executed {
        command: String,
        output: CommandOutput,
    },
}

pub struct Dispatcher {
    executor: Arc<dyn CommandExecutor>,
    history: Arc<dyn HistoryStore>,
}

impl Dispatcher {
    pub fn new(executor: Arc<dyn CommandExecutor>, history: Arc<dyn HistoryStore>) -> Self {
        Self { executor, history }
    }

    /// Record a command in the session's history
    ///
    /// # Errors
    ///
    /// Returns the store's error if the append could not be persisted.
    pub async fn record(&self, session_id: &str, command: &str) -> Result<()> {
        self.history.append(session_id, command).await
    }

    /// Run a command: history hook first, then the executor
    ///
    /// A failing history write is logged and does not stop execution.
    ///
    /// # Errors
    ///
    /// Relays the executor's error unchanged.
    pub async fn execute(&self, session: &SessionContext, command: &str) -> Result<CommandOutput> {
        if let Err(e) = self.record(&session.session_id, command).await {
            warn!(session = %session.session_id, error = %e, "Failed to record command in history");
        }

        self.executor.execute(session, command).await
    }

    /// Print or execute a resolved command
    ///
    /// # Errors
    ///
    /// Relays the executor's error unchanged.
    pub async fn dispatch(
        &self,
        session: &SessionContext,
        command: &str,
        print_only: bool,
    ) -> Result<MessageOutcome> {
        if print_only {
            info!(session = %session.session_id, command = %command, "Printing expanded command");
            return Ok(MessageOutcome::Printed(command.to_string()));
        }

        info!(session = %session.session_id, command = %command, "Executing expanded command");
        let output = self.execute(session, command).await?;

        Ok(MessageOutcome::Executed {
            command: command.to_string(),
            output,
        })
    }
}
