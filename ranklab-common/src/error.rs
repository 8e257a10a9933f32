//! Common error types for RankLab

use thiserror::Error;

/// Common result type for RankLab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across RankLab modules
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not legal in the current session state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Result delivery to the submission endpoint failed
    #[error("Submission error: {0}")]
    Submit(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
