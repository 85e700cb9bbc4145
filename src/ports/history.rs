//! History Store Port
//!
//! Storage for per-session command logs. The engine only ever reads a
//! whole record or appends one command; trimming to the retention window
//! is the store's responsibility.

use async_trait::async_trait;

use crate::domain::HistoryRecord;
use crate::error::Result;

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Fetch the record for a session, if any command was ever logged for it
    async fn get(&self, session_id: &str) -> Result<Option<HistoryRecord>>;

    /// Append a command to a session's log, creating the record on first use
    ///
    /// Appends to the same session are serialized: two concurrent appends
    /// both land, in some order.
    ///
    /// # Errors
    /// Returns `Storage` if a persisting backend fails to write.
    async fn append(&self, session_id: &str, command: &str) -> Result<()>;
}
