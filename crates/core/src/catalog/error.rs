use thiserror::Error;

/// Errors that can occur when validating a category.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Category name cannot be empty")]
    EmptyName,
    #[error("Category name too long (max 200 characters)")]
    NameTooLong,
    #[error("Category cannot be its own parent")]
    SelfParent,
}

/// Errors that can occur when validating a product.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProductError {
    #[error("Product name cannot be empty")]
    EmptyName,
    #[error("Product name too long (max 200 characters)")]
    NameTooLong,
    #[error("Category ID is required")]
    MissingCategoryId,
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),
    #[error("Invalid unit quantity: {0}")]
    InvalidQuantity(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_error_display() {
        assert_eq!(
            CategoryError::EmptyName.to_string(),
            "Category name cannot be empty"
        );
        assert_eq!(
            CategoryError::SelfParent.to_string(),
            "Category cannot be its own parent"
        );
    }

    #[test]
    fn test_product_error_display() {
        assert_eq!(
            ProductError::MissingCategoryId.to_string(),
            "Category ID is required"
        );
        assert_eq!(
            ProductError::InvalidPrice(-1.0).to_string(),
            "Invalid price: -1"
        );
    }
}
