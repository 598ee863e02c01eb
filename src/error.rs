//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Lookups and inserts are infallible; every variant here is raised while
/// constructing or configuring a cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The cache was configured with an unusable value (e.g. a zero interval)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No Tokio runtime was available to run the reclamation task
    #[error("Runtime unavailable: {0}")]
    Runtime(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CacheError::InvalidConfiguration("interval must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: interval must be positive"
        );

        let err = CacheError::Runtime("no reactor running".to_string());
        assert_eq!(err.to_string(), "Runtime unavailable: no reactor running");
    }
}
