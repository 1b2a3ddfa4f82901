use thiserror::Error;

use crate::cache::CacheError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    /// A memoized value could not be decoded as the type the caller expects.
    #[error("Cached value for \"{signature}\" has an unexpected shape: {reason}")]
    CacheTypeMismatch { signature: String, reason: String },
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Category",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Category not found: abc-123");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Product",
            id: "p-1".to_string(),
        };
        assert_eq!(error.to_string(), "Product already exists: p-1");
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("Table not found".to_string());
        assert_eq!(error.to_string(), "Query failed: Table not found");
    }

    #[test]
    fn test_repository_error_invalid_data_display() {
        let error = RepositoryError::InvalidData("Missing or invalid field: name".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid data: Missing or invalid field: name"
        );
    }

    #[test]
    fn test_repository_error_cache_type_mismatch_display() {
        let error = RepositoryError::CacheTypeMismatch {
            signature: "Find abcd".to_string(),
            reason: "invalid type: sequence, expected struct Category".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cached value for \"Find abcd\" has an unexpected shape: invalid type: sequence, expected struct Category"
        );
    }

    #[test]
    fn test_repository_error_from_cache_error() {
        let error: RepositoryError = CacheError::OperationFailed("lock poisoned".to_string()).into();
        assert_eq!(error.to_string(), "Cache operation failed: lock poisoned");
    }
}
