#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod executor;
pub mod ports;
pub mod storage;

pub use config::Config;
pub use domain::{BangEngine, Expression, HistoryRecord, MessageOutcome};
pub use error::{BangError, Result};
pub use ports::{CommandExecutor, CommandOutput, HistoryStore, SessionContext};

#[doc(hidden)]
pub use domain::resolver::position_for;
