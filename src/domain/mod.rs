//! Domain module - Core business logic
//!
//! This module contains the history store, the bang expression grammar,
//! the resolver and the engine that ties them to command execution.

pub mod dispatcher;
pub mod engine;
pub mod expansion;
pub mod history;
pub mod resolver;

pub use dispatcher::{Dispatcher, MessageOutcome};
pub use engine::BangEngine;
pub use expansion::{BangExpression, ExpansionParser, Expression};
pub use history::{HistoryConfig, HistoryRecord, MemoryHistoryStore};
pub use resolver::resolve;
