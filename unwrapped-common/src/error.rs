//! Common error types for Unwrapped

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for Unwrapped operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Unwrapped crates
#[derive(Error, Debug)]
pub enum Error {
    /// Data directory does not exist
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// No collection file exists for the requested year
    #[error("Collection not found for year {0}")]
    CollectionNotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collection file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
