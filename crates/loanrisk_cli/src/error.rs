//! CLI error type.

use loanrisk_engine::EngineError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file path did not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command argument was malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input file was not valid JSON for its expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Scenario resolution or execution failed.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
