use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Maximum number of commands retained per session
    #[serde(default = "default_history")]
    pub history: usize,

    /// Trigger prefix that activates expansion
    #[serde(default = "default_bang")]
    pub bang: String,

    #[serde(default)]
    pub executor: ExecutorConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history: default_history(),
            bang: default_bang(),
            executor: ExecutorConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

/// How resolved commands are run by the bundled shell executor
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExecutorConfig {
    /// Program used to run commands
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Argument passed before the command text
    #[serde(default = "default_shell_arg")]
    pub shell_arg: String,

    /// Execution timeout in seconds (0 disables the timeout)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            shell_arg: default_shell_arg(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Where history is persisted between runs
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// JSON file holding every session's history. In-memory only when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

const fn default_history() -> usize {
    500
}

fn default_bang() -> String {
    "!".to_string()
}

fn default_shell() -> String {
    "sh".to_string()
}

fn default_shell_arg() -> String {
    "-c".to_string()
}

const fn default_timeout_seconds() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.history, 500);
        assert_eq!(config.bang, "!");
        assert_eq!(config.executor.shell, "sh");
        assert_eq!(config.executor.shell_arg, "-c");
        assert_eq!(config.executor.timeout_seconds, 30);
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config.history, 500);
        assert_eq!(config.bang, "!");
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
history: 20
bang: "%"
executor:
  timeout_seconds: 0
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.history, 20);
        assert_eq!(config.bang, "%");
        assert_eq!(config.executor.timeout_seconds, 0);
        assert_eq!(config.executor.shell, "sh");
    }

    #[test]
    fn test_storage_path() {
        let yaml = "storage:\n  path: /var/lib/bang/history.json\n";
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(
            config.storage.path,
            Some(PathBuf::from("/var/lib/bang/history.json"))
        );
    }
}
