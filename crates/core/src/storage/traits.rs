use async_trait::async_trait;

use crate::catalog::{Category, Product};

use super::{RepositoryError, Result};

/// Maximum number of parent hops followed by [`CategoryRepository::find_main_category`].
pub const MAX_PARENT_HOPS: usize = 10;

/// Repository for category operations.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Lists visible categories without a parent, skipping `offset` and
    /// returning at most `limit` items.
    async fn main_categories(&self, limit: usize, offset: usize) -> Result<Vec<Category>>;

    /// Lists the direct children of a category.
    async fn sub_categories(&self, parent_id: &str) -> Result<Vec<Category>>;

    /// Gets a category by its ID.
    async fn find(&self, id: &str) -> Result<Option<Category>>;

    /// Gets every category whose ID is in `ids`. Missing IDs are skipped.
    async fn find_many(&self, ids: &[String]) -> Result<Vec<Category>>;

    /// Follows the parent chain of a category up to its main category.
    ///
    /// Returns the category itself when it has no parent.
    async fn find_main_category(&self, child_id: &str) -> Result<Category> {
        let mut current_id = child_id.to_string();

        for _ in 0..=MAX_PARENT_HOPS {
            let category = self
                .find(&current_id)
                .await?
                .ok_or_else(|| RepositoryError::NotFound {
                    entity_type: "Category",
                    id: current_id.clone(),
                })?;

            match category.parent_category_id.as_deref() {
                Some(parent) if !parent.is_empty() => current_id = parent.to_string(),
                _ => return Ok(category),
            }
        }

        Err(RepositoryError::InvalidData(format!(
            "the main category of {} could not be found after {} hops",
            child_id, MAX_PARENT_HOPS
        )))
    }

    /// Creates a new category.
    async fn store(&self, category: &Category) -> Result<()>;

    /// Replaces the existing category stored under `id`.
    async fn update(&self, id: &str, category: &Category) -> Result<()>;

    /// Deletes a category by its ID. Deleting an absent ID is not an error.
    async fn remove(&self, id: &str) -> Result<()>;

    /// Lists every category.
    async fn all(&self) -> Result<Vec<Category>>;

    /// Counts every category.
    async fn total(&self) -> Result<i64>;
}

/// Repository for product operations.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Creates a new product.
    async fn store(&self, product: &Product) -> Result<()>;

    /// Replaces the existing product stored under `id`.
    async fn update(&self, id: &str, product: &Product) -> Result<()>;

    /// Gets a product by its ID.
    async fn find_one(&self, id: &str) -> Result<Option<Product>>;

    /// Gets every product whose ID is in `ids`. Missing IDs are skipped.
    async fn find_many(&self, ids: &[String]) -> Result<Vec<Product>>;

    /// Lists the products of a category.
    async fn find_by_category_id(&self, category_id: &str) -> Result<Vec<Product>>;

    /// Deletes a product by its ID. Deleting an absent ID is not an error.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Lists every product.
    async fn all(&self) -> Result<Vec<Product>>;
}
