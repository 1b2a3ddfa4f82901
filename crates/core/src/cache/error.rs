use thiserror::Error;

/// Errors raised by a cache backend.
///
/// A key with no value is not an error: lookups report it as `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The backend could not be built or could not complete a request.
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
    /// A memoized value could not be encoded to, or decoded from, bytes.
    #[error("Cached value encoding failed: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let cases = [
            (
                CacheError::OperationFailed("max_entries must be greater than zero".to_string()),
                "Cache operation failed: max_entries must be greater than zero",
            ),
            (
                CacheError::Serialization("expected value at line 1 column 1".to_string()),
                "Cached value encoding failed: expected value at line 1 column 1",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }
}
