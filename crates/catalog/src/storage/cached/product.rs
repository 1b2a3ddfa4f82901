//! Cached product repository decorator.
//!
//! Wraps a `ProductRepository` implementation with time-boxed memoization.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use catalog_core::cache::{
    find_product_signature, products_by_category_signature, Cache, ALL_PRODUCTS_SIGNATURE,
};
use catalog_core::catalog::Product;
use catalog_core::storage::{ProductRepository, Result};

use super::memoize;

/// Cached product repository decorator.
///
/// Memoizes `find_one`, `find_by_category_id` and `all`. Everything else is
/// passed through to the wrapped repository.
pub struct CachedProductRepository<R, C>
where
    R: ProductRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CachedProductRepository<R, C>
where
    R: ProductRepository,
    C: Cache,
{
    /// Creates a new cached product repository.
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }
}

#[async_trait]
impl<R, C> ProductRepository for CachedProductRepository<R, C>
where
    R: ProductRepository + 'static,
    C: Cache + 'static,
{
    async fn store(&self, product: &Product) -> Result<()> {
        self.repository.store(product).await?;
        tracing::debug!(product_id = %product.id, name = %product.name, "Product stored");
        Ok(())
    }

    async fn update(&self, id: &str, product: &Product) -> Result<()> {
        self.repository.update(id, product).await?;
        tracing::debug!(product_id = %id, "Product updated, memoized reads kept until stale");
        Ok(())
    }

    async fn find_one(&self, id: &str) -> Result<Option<Product>> {
        memoize(
            self.cache.as_ref(),
            find_product_signature(id),
            self.ttl,
            || self.repository.find_one(id),
        )
        .await
    }

    async fn find_many(&self, ids: &[String]) -> Result<Vec<Product>> {
        self.repository.find_many(ids).await
    }

    async fn find_by_category_id(&self, category_id: &str) -> Result<Vec<Product>> {
        memoize(
            self.cache.as_ref(),
            products_by_category_signature(category_id),
            self.ttl,
            || self.repository.find_by_category_id(category_id),
        )
        .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.repository.delete(id).await?;
        tracing::debug!(product_id = %id, "Product deleted, memoized reads kept until stale");
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Product>> {
        memoize(
            self.cache.as_ref(),
            ALL_PRODUCTS_SIGNATURE.to_string(),
            self.ttl,
            || self.repository.all(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use catalog_core::storage::RepositoryError;

    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;

    const TTL: Duration = Duration::from_secs(60);

    // Counts reads that reach the wrapped repository.
    struct CountingRepository {
        inner: InMemoryRepository,
        reads: AtomicUsize,
    }

    impl CountingRepository {
        fn new() -> Self {
            Self {
                inner: InMemoryRepository::new(),
                reads: AtomicUsize::new(0),
            }
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProductRepository for CountingRepository {
        async fn store(&self, product: &Product) -> Result<()> {
            ProductRepository::store(&self.inner, product).await
        }

        async fn update(&self, id: &str, product: &Product) -> Result<()> {
            ProductRepository::update(&self.inner, id, product).await
        }

        async fn find_one(&self, id: &str) -> Result<Option<Product>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.find_one(id).await
        }

        async fn find_many(&self, ids: &[String]) -> Result<Vec<Product>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            ProductRepository::find_many(&self.inner, ids).await
        }

        async fn find_by_category_id(&self, category_id: &str) -> Result<Vec<Product>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_category_id(category_id).await
        }

        async fn delete(&self, id: &str) -> Result<()> {
            self.inner.delete(id).await
        }

        async fn all(&self) -> Result<Vec<Product>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            ProductRepository::all(&self.inner).await
        }
    }

    fn setup() -> (
        Arc<CountingRepository>,
        Arc<MemoryCache>,
        CachedProductRepository<CountingRepository, MemoryCache>,
    ) {
        let repo = Arc::new(CountingRepository::new());
        let cache = Arc::new(MemoryCache::new(100).unwrap());
        let cached = CachedProductRepository::new(repo.clone(), cache.clone(), TTL);
        (repo, cache, cached)
    }

    #[tokio::test]
    async fn test_find_one_is_memoized() {
        let (repo, cache, cached) = setup();
        let product = Product::new("Cola", "sodas", 1.5).with_id("p1");
        cached.store(&product).await.unwrap();

        let first = cached.find_one("p1").await.unwrap();
        let second = cached.find_one("p1").await.unwrap();

        assert_eq!(first, Some(product.clone()));
        assert_eq!(first, second);
        assert_eq!(repo.reads(), 1);
        assert!(cache.has("FindOne p1").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_category_and_all_are_memoized() {
        let (repo, _cache, cached) = setup();
        cached
            .store(&Product::new("Cola", "sodas", 1.5).with_id("p1"))
            .await
            .unwrap();
        cached
            .store(&Product::new("Chips", "snacks", 2.0).with_id("p2"))
            .await
            .unwrap();

        let sodas = cached.find_by_category_id("sodas").await.unwrap();
        cached.find_by_category_id("sodas").await.unwrap();
        let snacks = cached.find_by_category_id("snacks").await.unwrap();
        let all = cached.all().await.unwrap();
        cached.all().await.unwrap();

        assert_eq!(sodas.len(), 1);
        assert_eq!(snacks.len(), 1);
        assert_eq!(all.len(), 2);
        assert_eq!(repo.reads(), 3);
    }

    #[tokio::test]
    async fn test_find_many_passes_through() {
        let (repo, cache, cached) = setup();
        let ids = vec!["p1".to_string()];

        cached.find_many(&ids).await.unwrap();
        cached.find_many(&ids).await.unwrap();

        assert_eq!(repo.reads(), 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_serves_stale_value_until_ttl() {
        let (repo, _cache, cached) = setup();
        cached
            .store(&Product::new("Cola", "sodas", 1.5).with_id("p1"))
            .await
            .unwrap();
        cached.find_one("p1").await.unwrap();

        cached.delete("p1").await.unwrap();
        assert!(cached.find_one("p1").await.unwrap().is_some());

        tokio::time::advance(TTL).await;
        assert!(cached.find_one("p1").await.unwrap().is_none());
        assert_eq!(repo.reads(), 2);
    }

    #[tokio::test]
    async fn test_store_conflict_propagates() {
        let (_repo, cache, cached) = setup();
        let product = Product::new("Cola", "sodas", 1.5).with_id("p1");
        cached.store(&product).await.unwrap();

        let result = cached.store(&product).await;

        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists { entity_type: "Product", .. })
        ));
        assert!(cache.is_empty().await);
    }
}
