//! Per-session command history
//!
//! Every session owns an independent, bounded log of raw command strings,
//! oldest first. Appends for one session are serialized by that session's
//! own lock; the outer map is only write-locked when a session is seen for
//! the first time.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ports::HistoryStore;

/// Snapshot of one session's command log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "session")]
    pub session_id: String,
    /// Commands in insertion order, oldest first
    pub commands: Vec<String>,
}

impl HistoryRecord {
    #[must_use]
    pub fn new(session_id: &str, commands: Vec<String>) -> Self {
        Self {
            session_id: session_id.to_string(),
            commands,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.commands.last().map(String::as_str)
    }
}

/// Configuration for command history
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum number of entries to keep per session
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 500 }
    }
}

type SessionLog = Arc<Mutex<VecDeque<String>>>;

/// In-memory keyed history store
pub struct MemoryHistoryStore {
    sessions: RwLock<HashMap<String, SessionLog>>,
    max_entries: usize,
}

impl MemoryHistoryStore {
    /// Create a new store
    #[must_use]
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_entries: config.max_entries,
        }
    }

    /// Create with default configuration
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(&HistoryConfig::default())
    }

    #[must_use]
    pub const fn max_entries(&self) -> usize {
        self.max_entries
    }

    fn session_log(&self, session_id: &str) -> Option<SessionLog> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .map(Arc::clone)
    }

    fn session_log_or_create(&self, session_id: &str) -> SessionLog {
        if let Some(log) = self.session_log(session_id) {
            return log;
        }

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let log = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(VecDeque::new())));
        Arc::clone(log)
    }

    /// Get a copy of a session's record
    #[must_use]
    pub fn record(&self, session_id: &str) -> Option<HistoryRecord> {
        let log = self.session_log(session_id)?;
        let commands = log.lock().unwrap_or_else(PoisonError::into_inner);
        Some(HistoryRecord::new(
            session_id,
            commands.iter().cloned().collect(),
        ))
    }

    /// Append a command, dropping the oldest entries beyond the retention window
    pub fn push(&self, session_id: &str, command: &str) {
        let log = self.session_log_or_create(session_id);
        let mut commands = log.lock().unwrap_or_else(PoisonError::into_inner);

        commands.push_back(command.to_string());
        while commands.len() > self.max_entries {
            commands.pop_front();
        }
    }

    /// Number of commands stored for a session
    #[must_use]
    pub fn len(&self, session_id: &str) -> usize {
        let Some(log) = self.session_log(session_id) else {
            return 0;
        };
        let commands = log.lock().unwrap_or_else(PoisonError::into_inner);
        commands.len()
    }

    /// Number of sessions with a record
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if no session has any history
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.session_count() == 0
    }

    /// Copy every record, sorted by session id
    #[must_use]
    pub fn records(&self) -> Vec<HistoryRecord> {
        let logs: Vec<(String, SessionLog)> = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, log)| (id.clone(), Arc::clone(log)))
            .collect();

        let mut records: Vec<HistoryRecord> = logs
            .into_iter()
            .map(|(id, log)| {
                let commands = log.lock().unwrap_or_else(PoisonError::into_inner);
                HistoryRecord::new(&id, commands.iter().cloned().collect())
            })
            .collect();
        records.sort_by(|a, b| a.session_id.cmp(&b.session_id));
        records
    }

    /// Replace the stored records, keeping only the most recent entries of each
    pub fn restore(&self, records: Vec<HistoryRecord>) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.clear();

        for record in records {
            let skip = record.commands.len().saturating_sub(self.max_entries);
            let commands: VecDeque<String> = record.commands.into_iter().skip(skip).collect();
            sessions.insert(record.session_id, Arc::new(Mutex::new(commands)));
        }
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn get(&self, session_id: &str) -> Result<Option<HistoryRecord>> {
        Ok(self.record(session_id))
    }

    async fn append(&self, session_id: &str, command: &str) -> Result<()> {
        self.push(session_id, command);
        Ok(())
    }
}
