//! Repository wiring.
//!
//! Bundles the category and product repositories as trait objects so callers
//! do not depend on which backend, or whether memoization, was chosen.

use std::sync::Arc;
use std::time::Duration;

use catalog_core::storage::{CategoryRepository, ProductRepository};

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::storage::{CachedCategoryRepository, CachedProductRepository, InMemoryRepository};

/// The repositories used by services and commands.
#[derive(Clone)]
pub struct Repositories {
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
}

impl Repositories {
    /// Wraps both repositories in memoizing decorators sharing one cache.
    fn build<CR, PR>(
        categories: Arc<CR>,
        products: Arc<PR>,
        cache: Option<(Arc<MemoryCache>, Duration)>,
    ) -> Self
    where
        CR: CategoryRepository + 'static,
        PR: ProductRepository + 'static,
    {
        match cache {
            Some((cache, ttl)) => Self {
                categories: Arc::new(CachedCategoryRepository::new(
                    categories,
                    cache.clone(),
                    ttl,
                )),
                products: Arc::new(CachedProductRepository::new(products, cache, ttl)),
            },
            None => Self {
                categories,
                products,
            },
        }
    }

    fn memory_cache(
        config: &Config,
        cached: bool,
    ) -> anyhow::Result<Option<(Arc<MemoryCache>, Duration)>> {
        if !cached {
            return Ok(None);
        }
        let cache = MemoryCache::new(config.cache_max_entries)?;
        tracing::debug!(
            max_entries = config.cache_max_entries,
            ttl_seconds = config.cache_ttl().as_secs(),
            "Memoization enabled"
        );
        Ok(Some((Arc::new(cache), config.cache_ttl())))
    }

    /// Creates repositories backed by process-local maps.
    pub fn in_memory(config: &Config, cached: bool) -> anyhow::Result<Self> {
        let repo = Arc::new(InMemoryRepository::new());
        Ok(Self::build(repo.clone(), repo, Self::memory_cache(config, cached)?))
    }

    /// Creates repositories backed by the configured DynamoDB tables.
    #[cfg(feature = "dynamodb")]
    pub async fn dynamodb(config: &Config, cached: bool) -> anyhow::Result<Self> {
        use crate::storage::dynamodb::create_client;
        use crate::storage::{DynamoDbCategoryRepository, DynamoDbProductRepository};

        let client = create_client(config.aws_endpoint_url.as_deref()).await;
        let categories = Arc::new(DynamoDbCategoryRepository::new(
            client.clone(),
            &config.categories_table,
        ));
        let products = Arc::new(DynamoDbProductRepository::new(client, &config.products_table));

        tracing::debug!(
            categories_table = %config.categories_table,
            products_table = %config.products_table,
            "DynamoDB repositories configured"
        );

        Ok(Self::build(
            categories,
            products,
            Self::memory_cache(config, cached)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::catalog::Category;

    fn test_config() -> Config {
        Config {
            cache_ttl_seconds: 300,
            cache_max_entries: 100,
            categories_table: "categories".to_string(),
            products_table: "products".to_string(),
            aws_endpoint_url: None,
        }
    }

    #[tokio::test]
    async fn test_cached_repositories_memoize_reads() {
        let repos = Repositories::in_memory(&test_config(), true).unwrap();
        let category = Category::new("Beverages").with_id("abcd");
        repos.categories.store(&category).await.unwrap();

        assert!(repos.categories.find("abcd").await.unwrap().is_some());
        repos.categories.remove("abcd").await.unwrap();

        // The memoized read outlives the removal until its TTL passes.
        assert!(repos.categories.find("abcd").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_uncached_repositories_read_through() {
        let repos = Repositories::in_memory(&test_config(), false).unwrap();
        let category = Category::new("Beverages").with_id("abcd");
        repos.categories.store(&category).await.unwrap();

        assert!(repos.categories.find("abcd").await.unwrap().is_some());
        repos.categories.remove("abcd").await.unwrap();

        assert!(repos.categories.find("abcd").await.unwrap().is_none());
    }

    #[test]
    fn test_zero_cache_capacity_is_an_error() {
        let config = Config {
            cache_max_entries: 0,
            ..test_config()
        };

        assert!(Repositories::in_memory(&config, true).is_err());
        assert!(Repositories::in_memory(&config, false).is_ok());
    }
}
