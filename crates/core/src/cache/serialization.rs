//! Pure functions for encoding values to and from cache bytes.
//!
//! Cached values are stored as JSON so entries stay readable when inspected.

use serde::{de::DeserializeOwned, Serialize};

use super::{CacheError, Result};

/// Serializes a value to JSON bytes.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Deserializes JSON bytes to a value.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::Serialization(e.to_string()))
}
