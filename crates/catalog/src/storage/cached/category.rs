//! Cached category repository decorator.
//!
//! Wraps a `CategoryRepository` implementation with time-boxed memoization.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use catalog_core::cache::{
    find_category_signature, main_categories_signature, sub_categories_signature, Cache,
    ALL_CATEGORIES_SIGNATURE,
};
use catalog_core::catalog::Category;
use catalog_core::storage::{CategoryRepository, Result};

use super::memoize;

/// Cached category repository decorator.
///
/// Memoizes `main_categories`, `sub_categories`, `find` and `all`.
/// `find_many`, `total`, `find_main_category` and every mutation go straight
/// to the wrapped repository and never touch the cache.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `C` - The cache implementation
pub struct CachedCategoryRepository<R, C>
where
    R: CategoryRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CachedCategoryRepository<R, C>
where
    R: CategoryRepository,
    C: Cache,
{
    /// Creates a new cached category repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository to cache
    /// * `cache` - The cache implementation
    /// * `ttl` - How long a memoized read stays fresh
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }
}

#[async_trait]
impl<R, C> CategoryRepository for CachedCategoryRepository<R, C>
where
    R: CategoryRepository + 'static,
    C: Cache + 'static,
{
    async fn main_categories(&self, limit: usize, offset: usize) -> Result<Vec<Category>> {
        memoize(
            self.cache.as_ref(),
            main_categories_signature(limit, offset),
            self.ttl,
            || self.repository.main_categories(limit, offset),
        )
        .await
    }

    async fn sub_categories(&self, parent_id: &str) -> Result<Vec<Category>> {
        memoize(
            self.cache.as_ref(),
            sub_categories_signature(parent_id),
            self.ttl,
            || self.repository.sub_categories(parent_id),
        )
        .await
    }

    async fn find(&self, id: &str) -> Result<Option<Category>> {
        memoize(
            self.cache.as_ref(),
            find_category_signature(id),
            self.ttl,
            || self.repository.find(id),
        )
        .await
    }

    async fn find_many(&self, ids: &[String]) -> Result<Vec<Category>> {
        self.repository.find_many(ids).await
    }

    async fn find_main_category(&self, child_id: &str) -> Result<Category> {
        self.repository.find_main_category(child_id).await
    }

    async fn store(&self, category: &Category) -> Result<()> {
        self.repository.store(category).await?;
        tracing::debug!(category_id = %category.id, name = %category.name, "Category stored");
        Ok(())
    }

    async fn update(&self, id: &str, category: &Category) -> Result<()> {
        self.repository.update(id, category).await?;
        tracing::debug!(category_id = %id, "Category updated, memoized reads kept until stale");
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.repository.remove(id).await?;
        tracing::debug!(category_id = %id, "Category removed, memoized reads kept until stale");
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Category>> {
        memoize(
            self.cache.as_ref(),
            ALL_CATEGORIES_SIGNATURE.to_string(),
            self.ttl,
            || self.repository.all(),
        )
        .await
    }

    async fn total(&self) -> Result<i64> {
        self.repository.total().await
    }
}
