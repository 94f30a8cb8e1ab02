//! Common error types for SnapHunt

use thiserror::Error;

/// Common result type for SnapHunt operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across SnapHunt services
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalogue loading or validation error
    #[error("Catalogue error: {0}")]
    Catalogue(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
