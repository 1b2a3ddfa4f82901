use super::error::{CategoryError, ProductError};
use super::types::{Category, Product};

const MAX_NAME_LEN: usize = 200;

/// Validates a category before creation or update.
pub fn validate_category(category: &Category) -> Result<(), CategoryError> {
    if category.name.trim().is_empty() {
        return Err(CategoryError::EmptyName);
    }
    if category.name.len() > MAX_NAME_LEN {
        return Err(CategoryError::NameTooLong);
    }
    if category.parent_category_id.as_deref() == Some(category.id.as_str()) {
        return Err(CategoryError::SelfParent);
    }
    Ok(())
}

/// Validates a product before creation or update.
pub fn validate_product(product: &Product) -> Result<(), ProductError> {
    if product.name.trim().is_empty() {
        return Err(ProductError::EmptyName);
    }
    if product.name.len() > MAX_NAME_LEN {
        return Err(ProductError::NameTooLong);
    }
    if product.category_id.trim().is_empty() {
        return Err(ProductError::MissingCategoryId);
    }
    if !product.price.is_finite() || product.price < 0.0 {
        return Err(ProductError::InvalidPrice(product.price));
    }
    if let Some(unit) = &product.unit_of_measurement {
        if !unit.quantity.is_finite() || unit.quantity <= 0.0 {
            return Err(ProductError::InvalidQuantity(unit.quantity));
        }
    }
    Ok(())
}

/// Returns the `limit` items that follow the first `offset` items.
pub fn paginate<T>(items: Vec<T>, limit: usize, offset: usize) -> Vec<T> {
    items.into_iter().skip(offset).take(limit).collect()
}
