//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Caller violated the input contract
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(#[from] riskgate_repository::RepositoryError),

    /// Generic SDK error
    #[error("SDK error: {0}")]
    GenericError(String),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_error() {
        let error = SdkError::InvalidRequest("email must not be empty".to_string());
        assert!(error.to_string().contains("Invalid request"));
        assert!(error.to_string().contains("email must not be empty"));
    }

    #[test]
    fn test_repository_error_conversion() {
        let repo_error =
            riskgate_repository::RepositoryError::Unavailable("history down".to_string());
        let sdk_error: SdkError = repo_error.into();
        assert!(sdk_error.to_string().contains("Repository error"));
        assert!(sdk_error.to_string().contains("history down"));
    }

    #[test]
    fn test_result_err() {
        let result: Result<()> = Err(SdkError::ConfigError("bad threshold".to_string()));
        assert!(result.is_err());
    }
}
