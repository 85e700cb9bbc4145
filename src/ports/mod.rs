//! Ports module - Trait definitions for hexagonal architecture
//!
//! This module contains the trait definitions (ports) that define
//! the boundaries between the expansion engine and external adapters.

mod executor;
mod history;

pub use executor::{CommandExecutor, CommandOutput, SessionContext};
pub use history::HistoryStore;

#[cfg(test)]
pub use executor::mock;
