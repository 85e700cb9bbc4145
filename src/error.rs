use thiserror::Error;

#[derive(Error, Debug)]
pub enum BangError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Invalid configuration: {field} - {reason}")]
    ConfigInvalid { field: String, reason: String },

    // Expansion errors
    #[error("No history available")]
    NoHistory { session_id: String },

    #[error("Invalid index: {index}")]
    InvalidIndex { index: i64 },

    #[error("Command not found: {pattern}")]
    CommandNotFound { pattern: String },

    // Execution errors
    #[error("Command execution failed: {reason}")]
    Execution { reason: String },

    #[error("Command timeout after {seconds}s")]
    ExecutionTimeout { seconds: u64 },

    // Storage errors
    #[error("History storage error: {reason}")]
    Storage { reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // YAML errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_saphyr::Error),
}

impl BangError {
    /// Whether this error is one of the three expansion failures
    /// (as opposed to an execution or infrastructure failure).
    #[must_use]
    pub const fn is_expansion_error(&self) -> bool {
        matches!(
            self,
            Self::NoHistory { .. } | Self::InvalidIndex { .. } | Self::CommandNotFound { .. }
        )
    }

    /// Stable message key for a localization layer.
    ///
    /// Only expansion failures have a key; everything else is relayed as-is.
    #[must_use]
    pub const fn message_key(&self) -> Option<&'static str> {
        match self {
            Self::NoHistory { .. } => Some("bang.errors.no-history"),
            Self::InvalidIndex { .. } => Some("bang.errors.invalid-index"),
            Self::CommandNotFound { .. } => Some("bang.errors.command-not-found"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BangError>;
