//! Repository error types

use thiserror::Error;

/// Repository error
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Backend unavailable or unreachable
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record failed validation on write
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Generic repository error
    #[error("Repository error: {0}")]
    Other(String),
}

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
