//! Executor adapters

mod shell;

pub use shell::ShellExecutor;
