use super::types::Config;
use crate::error::{BangError, Result};
use std::path::Path;
use tracing::debug;

/// Load configuration from a YAML file
///
/// # Errors
///
/// Returns an error if:
/// - The configuration file does not exist
/// - The file cannot be read
/// - The YAML content is invalid or cannot be parsed
/// - The configuration fails validation (e.g., zero history size, empty trigger)
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(BangError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_saphyr::from_str(&content)?;

    validate_config(&config)?;

    debug!(
        config_path = %path.display(),
        history = config.history,
        bang = %config.bang,
        "Configuration parsed"
    );

    Ok(config)
}

/// Validate the configuration
///
/// # Errors
///
/// Returns `ConfigInvalid` naming the first offending field.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.history == 0 {
        return Err(BangError::ConfigInvalid {
            field: "history".to_string(),
            reason: "Must keep at least one command".to_string(),
        });
    }

    if config.bang.is_empty() {
        return Err(BangError::ConfigInvalid {
            field: "bang".to_string(),
            reason: "Trigger prefix cannot be empty".to_string(),
        });
    }

    // Messages are trimmed before the trigger check, so whitespace could never match
    if config.bang.chars().any(char::is_whitespace) {
        return Err(BangError::ConfigInvalid {
            field: "bang".to_string(),
            reason: "Trigger prefix cannot contain whitespace".to_string(),
        });
    }

    if config.executor.shell.trim().is_empty() {
        return Err(BangError::ConfigInvalid {
            field: "executor.shell".to_string(),
            reason: "Shell program cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// Get the default config path
#[must_use]
pub fn default_config_path() -> std::path::PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("bang-history")
        .join("config.yaml")
}
