//! Entity creation services.
//!
//! Each service turns a request into a validated entity and stores it through
//! whichever repository it was built with, cached or not.

use std::sync::Arc;

use thiserror::Error;

use catalog_core::catalog::{
    validate_category, validate_product, Category, CategoryError, CreateCategoryRequest,
    CreateProductRequest, Product, ProductError,
};
use catalog_core::storage::{CategoryRepository, ProductRepository, RepositoryError};

/// Errors returned by the catalog services.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Invalid category: {0}")]
    InvalidCategory(#[from] CategoryError),
    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] ProductError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    /// Returns true if the request was rejected before reaching storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ServiceError::InvalidCategory(_) | ServiceError::InvalidProduct(_)
        )
    }
}

/// Creates categories.
pub struct CategoryService<R: CategoryRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: CategoryRepository + ?Sized> CategoryService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Builds a category from the request, validates it and stores it.
    pub async fn new_category(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<Category, ServiceError> {
        let category = request.into_category();
        validate_category(&category)?;

        self.repository.store(&category).await?;
        tracing::info!(category_id = %category.id, name = %category.name, "Category created");

        Ok(category)
    }
}

/// Creates products.
pub struct ProductService<R: ProductRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Builds a product from the request, validates it and stores it.
    pub async fn new_product(&self, request: CreateProductRequest) -> Result<Product, ServiceError> {
        let product = request.into_product();
        validate_product(&product)?;

        self.repository.store(&product).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "Product created");

        Ok(product)
    }
}
