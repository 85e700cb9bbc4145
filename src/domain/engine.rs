//! History expansion engine
//!
//! Wires the trigger check, parser, resolver and dispatcher into the
//! per-message pipeline:
//!
//! ```text
//! message -> trigger stripped -> :p checked -> classified -> resolved
//!         -> executed | printed | error
//! ```
//!
//! The engine holds no per-message state, so any number of messages for any
//! number of sessions can be handled concurrently through a shared `Arc`.

use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::domain::dispatcher::{Dispatcher, MessageOutcome};
use crate::domain::expansion::{BangExpression, ExpansionParser};
use crate::domain::history::{HistoryConfig, HistoryRecord, MemoryHistoryStore};
use crate::domain::resolver::resolve;
use crate::error::Result;
use crate::ports::{CommandExecutor, CommandOutput, HistoryStore, SessionContext};

pub struct BangEngine {
    trigger: String,
    parser: ExpansionParser,
    history: Arc<dyn HistoryStore>,
    dispatcher: Dispatcher,
}

impl BangEngine {
    /// Create an engine over an existing history store and executor
    pub fn new(
        config: &Config,
        history: Arc<dyn HistoryStore>,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self {
            trigger: config.bang.clone(),
            parser: ExpansionParser::new(),
            dispatcher: Dispatcher::new(executor, Arc::clone(&history)),
            history,
        }
    }

    /// Create an engine with an in-memory store sized from the config
    pub fn in_memory(config: &Config, executor: Arc<dyn CommandExecutor>) -> Self {
        let history = Arc::new(MemoryHistoryStore::new(&HistoryConfig {
            max_entries: config.history,
        }));
        Self::new(config, history, executor)
    }

    #[must_use]
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Strip the trigger and parse the rest
    ///
    /// Returns `None` for messages that do not start with the trigger once
    /// surrounding whitespace is removed.
    #[must_use]
    pub fn parse_message(&self, text: &str) -> Option<BangExpression> {
        let body = text.trim().strip_prefix(self.trigger.as_str())?;
        Some(self.parser.parse(body))
    }

    /// Resolve a message to the command it refers to, without running it
    ///
    /// `Ok(None)` means the message is not a bang expression.
    ///
    /// # Errors
    ///
    /// `NoHistory`, `InvalidIndex` or `CommandNotFound` when resolution fails,
    /// or a storage error from the history store.
    pub async fn expand(&self, session_id: &str, text: &str) -> Result<Option<String>> {
        Ok(self
            .resolve_message(session_id, text)
            .await?
            .map(|(command, _)| command))
    }

    async fn resolve_message(&self, session_id: &str, text: &str) -> Result<Option<(String, bool)>> {
        let Some(parsed) = self.parse_message(text) else {
            return Ok(None);
        };

        if !parsed.expression.is_expansion() {
            debug!(session = %session_id, text = %text, "Not a bang expression, passing through");
            return Ok(None);
        }

        let record = self.history.get(session_id).await?;
        let command = resolve(session_id, record.as_ref(), &parsed.expression).inspect_err(|e| {
            debug!(session = %session_id, error = %e, "Bang expression did not resolve");
        })?;

        debug!(session = %session_id, command = %command, "Resolved bang expression");
        Ok(Some((command, parsed.print_only)))
    }

    /// Handle one incoming message
    ///
    /// # Errors
    ///
    /// Expansion failures (`NoHistory`, `InvalidIndex`, `CommandNotFound`),
    /// storage errors, or the executor's own error, relayed unchanged.
    pub async fn handle_message(
        &self,
        session: &SessionContext,
        text: &str,
    ) -> Result<MessageOutcome> {
        match self.resolve_message(&session.session_id, text).await? {
            None => Ok(MessageOutcome::PassThrough),
            Some((command, print_only)) => {
                self.dispatcher
                    .dispatch(session, &command, print_only)
                    .await
            }
        }
    }

    /// Run a command typed directly, logging it in history first
    ///
    /// # Errors
    ///
    /// Relays the executor's error unchanged.
    pub async fn execute(&self, session: &SessionContext, command: &str) -> Result<CommandOutput> {
        self.dispatcher.execute(session, command).await
    }

    /// History write hook for commands executed outside the engine
    ///
    /// # Errors
    ///
    /// Returns the store's error if the append could not be persisted.
    pub async fn record(&self, session_id: &str, command: &str) -> Result<()> {
        self.dispatcher.record(session_id, command).await
    }

    /// Current history of a session
    ///
    /// # Errors
    ///
    /// Returns the store's error if it cannot be read.
    pub async fn history(&self, session_id: &str) -> Result<Option<HistoryRecord>> {
        self.history.get(session_id).await
    }
}
