//! JSON file backed history store
//!
//! Keeps the live records in a [`MemoryHistoryStore`] and rewrites the whole
//! file after every append. Writes go to a sibling temp file first and are
//! renamed into place, so a crash never leaves a half-written history.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{HistoryConfig, HistoryRecord, MemoryHistoryStore};
use crate::error::{BangError, Result};
use crate::ports::HistoryStore;

pub struct JsonFileHistoryStore {
    memory: MemoryHistoryStore,
    path: PathBuf,
    /// Serializes file rewrites so snapshots land in order
    write_lock: Mutex<()>,
}

impl JsonFileHistoryStore {
    /// Open a store, loading existing records from `path` if the file exists
    ///
    /// Loaded records longer than the retention window are trimmed to their
    /// most recent entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>, config: &HistoryConfig) -> Result<Self> {
        let path = path.into();
        let memory = MemoryHistoryStore::new(config);

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let records: Vec<HistoryRecord> = serde_json::from_str(&content)?;
                info!(path = %path.display(), sessions = records.len(), "Loaded command history");
                memory.restore(records);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "History file not found, starting empty");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            memory,
            path,
            write_lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let records = self.memory.records();
        let json = serde_json::to_vec_pretty(&records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    async fn get(&self, session_id: &str) -> Result<Option<HistoryRecord>> {
        Ok(self.memory.record(session_id))
    }

    async fn append(&self, session_id: &str, command: &str) -> Result<()> {
        self.memory.push(session_id, command);

        self.persist().await.map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to persist command history");
            BangError::Storage {
                reason: e.to_string(),
            }
        })
    }
}
