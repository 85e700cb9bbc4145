//! Command Executor Port
//!
//! This module defines the trait for running a resolved command,
//! abstracting away whatever engine actually interprets it.

use async_trait::async_trait;

use crate::error::Result;

/// Identifies the conversation a command is executed for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionContext {
    pub session_id: String,
}

impl SessionContext {
    #[must_use]
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}

/// Output from a command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration_ms: u64,
}

impl CommandOutput {
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Trait for command execution
///
/// The engine never interprets command syntax itself; every resolved
/// command is handed to an implementation of this trait.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Execute a command on behalf of a session
    ///
    /// # Arguments
    /// * `session` - The session the command belongs to
    /// * `command` - The raw command text
    ///
    /// # Errors
    /// Any failure of the underlying engine. Callers relay it unchanged.
    async fn execute(&self, session: &SessionContext, command: &str) -> Result<CommandOutput>;
}
