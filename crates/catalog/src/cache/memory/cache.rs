//! In-memory cache implementation with LRU eviction.
//!
//! Values and their expiry bookkeeping share one `LruCache` behind a tokio
//! `RwLock`. Expiry is only consulted by `remember`; `get` and `has` report
//! whatever is stored.

use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;
use tokio::time::Instant;

use catalog_core::cache::{Cache, CacheError, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    /// Recorded by `remember`. `None` means the value never goes stale.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Returns true if an expiry was recorded and it is not in the future.
    fn is_stale(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<LruCache>>` for concurrent access.
/// The lock is never held while a `remember` computation runs, so concurrent
/// misses on the same key each compute and the last writer wins.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache holding at most `max_entries` keys.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::OperationFailed`] if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(max_entries).ok_or_else(|| {
            CacheError::OperationFailed("max_entries must be greater than zero".to_string())
        })?;

        Ok(Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        })
    }

    /// Returns the number of stored keys.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut store = self.store.write().await;
        let expires_at = store.peek(key).and_then(|entry| entry.expires_at);
        store.put(key.to_string(), CacheEntry { value, expires_at });
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;
        Ok(store.get(key).map(|entry| entry.value.clone()))
    }

    async fn has(&self, key: &str) -> Result<bool> {
        Ok(self.store.read().await.contains(key))
    }

    async fn remember<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> std::result::Result<Vec<u8>, E>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = std::result::Result<Vec<u8>, E>> + Send,
        E: From<CacheError> + Send,
    {
        {
            let mut store = self.store.write().await;
            if let Some(entry) = store.get(key) {
                if !entry.is_stale(Instant::now()) {
                    tracing::trace!(key, "Cache hit");
                    return Ok(entry.value.clone());
                }
                tracing::trace!(key, "Cache entry is stale");
            } else {
                tracing::trace!(key, "Cache miss");
            }
        }

        let value = compute().await?;

        // An expiry too far in the future to represent never goes stale.
        let expires_at = Instant::now().checked_add(ttl);
        let mut store = self.store.write().await;
        store.put(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                expires_at,
            },
        );
        tracing::debug!(key, ttl = ?ttl, "Cache entry refreshed");

        Ok(value)
    }
}
