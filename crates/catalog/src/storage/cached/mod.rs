//! Cached repository decorators.
//!
//! This module provides decorator implementations that wrap repository traits
//! with time-boxed memoization:
//!
//! - **Reads**: memoized under a signature derived from the call, recomputed
//!   once the stored value is older than the decorator's TTL
//! - **Writes**: passed straight through, with no invalidation
//!
//! A read issued after a write may therefore return the pre-write value until
//! its memoized entry goes stale.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let repo = Arc::new(InMemoryRepository::new());
//! let cache = Arc::new(MemoryCache::new(10_000)?);
//!
//! let categories = CachedCategoryRepository::new(repo, cache, Duration::from_secs(300));
//! ```

mod category;
mod product;

use std::future::Future;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use catalog_core::cache::{decode, encode, Cache};
use catalog_core::storage::{RepositoryError, Result};

pub use category::CachedCategoryRepository;
pub use product::CachedProductRepository;

/// Returns the value memoized under `signature`, running `fetch` when it is
/// missing or stale.
///
/// Repository errors from `fetch` are returned unchanged and nothing is
/// stored. A memoized value that does not decode as `T` fails with
/// [`RepositoryError::CacheTypeMismatch`].
async fn memoize<C, T, F, Fut>(cache: &C, signature: String, ttl: Duration, fetch: F) -> Result<T>
where
    C: Cache,
    T: Serialize + DeserializeOwned + Send,
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = Result<T>> + Send,
{
    let bytes = cache
        .remember(&signature, ttl, move || async move {
            let value = fetch().await?;
            Ok::<_, RepositoryError>(encode(&value)?)
        })
        .await?;

    decode(&bytes).map_err(|err| RepositoryError::CacheTypeMismatch {
        signature,
        reason: err.to_string(),
    })
}
