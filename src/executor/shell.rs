//! Local shell executor
//!
//! Runs each command as `<shell> <shell_arg> <command>` in a child process.

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, error};

use crate::config::ExecutorConfig;
use crate::error::{BangError, Result};
use crate::ports::{CommandExecutor, CommandOutput, SessionContext};

/// Exit code reported when the child was killed by a signal
const SIGNALLED_EXIT_CODE: i32 = -1;

pub struct ShellExecutor {
    config: ExecutorConfig,
}

impl ShellExecutor {
    #[must_use]
    pub const fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    fn build_command(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.config.shell);
        cmd.arg(&self.config.shell_arg)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl CommandExecutor for ShellExecutor {
    async fn execute(&self, session: &SessionContext, command: &str) -> Result<CommandOutput> {
        let start = Instant::now();
        debug!(session = %session.session_id, command = %command, shell = %self.config.shell, "Spawning command");

        let child = self
            .build_command(command)
            .spawn()
            .map_err(|e| BangError::Execution {
                reason: format!("Failed to spawn {}: {e}", self.config.shell),
            })?;

        let waited = if self.config.timeout_seconds == 0 {
            child.wait_with_output().await
        } else {
            let limit = Duration::from_secs(self.config.timeout_seconds);
            // kill_on_drop reaps the child when the timeout drops the future
            match timeout(limit, child.wait_with_output()).await {
                Ok(output) => output,
                Err(_) => {
                    error!(session = %session.session_id, command = %command, seconds = self.config.timeout_seconds, "Command timeout");
                    return Err(BangError::ExecutionTimeout {
                        seconds: self.config.timeout_seconds,
                    });
                }
            }
        };
        let output = waited.map_err(|e| BangError::Execution {
            reason: format!("Failed to wait for command: {e}"),
        })?;

        #[expect(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(SIGNALLED_EXIT_CODE),
            duration_ms,
        })
    }
}
