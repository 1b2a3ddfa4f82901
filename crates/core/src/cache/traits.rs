use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use super::{CacheError, Result};

/// A key-value cache of opaque byte values with time-boxed memoization.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Stores a value, overwriting any existing one.
    ///
    /// Expiry bookkeeping is left untouched. A key written only through `put`
    /// has no expiry and is treated as fresh by [`Cache::remember`] until a
    /// `remember` call records one.
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Gets a value by key, regardless of expiry.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Returns whether a value is present for the key, regardless of expiry.
    async fn has(&self, key: &str) -> Result<bool>;

    /// Returns the cached value for `key` unless it is missing or stale,
    /// otherwise awaits `compute` and stores its result for `ttl`.
    ///
    /// A failed `compute` leaves the entry untouched and its error is returned
    /// as is. Concurrent misses on the same key each run their own `compute`.
    async fn remember<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> std::result::Result<Vec<u8>, E>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = std::result::Result<Vec<u8>, E>> + Send,
        E: From<CacheError> + Send;
}
