//! Signatures that identify memoized repository calls.
//!
//! A signature is derived from the operation name and its arguments, so equal
//! calls share a cache slot and calls with different arguments never do.

/// Signature of the memoized "all categories" listing.
pub const ALL_CATEGORIES_SIGNATURE: &str = "All";

/// Signature of the memoized "all products" listing.
pub const ALL_PRODUCTS_SIGNATURE: &str = "AllProducts";

/// Returns the signature for a page of main categories.
pub fn main_categories_signature(limit: usize, offset: usize) -> String {
    format!("MainCategories {}-{}", limit, offset)
}

/// Returns the signature for the children of a category.
pub fn sub_categories_signature(parent_id: &str) -> String {
    format!("SubCategories {}", parent_id)
}

/// Returns the signature for a single category lookup.
pub fn find_category_signature(id: &str) -> String {
    format!("Find {}", id)
}

/// Returns the signature for a single product lookup.
pub fn find_product_signature(id: &str) -> String {
    format!("FindOne {}", id)
}

/// Returns the signature for the products of a category.
pub fn products_by_category_signature(category_id: &str) -> String {
    format!("FindByCategoryID {}", category_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_categories_signature() {
        assert_eq!(main_categories_signature(10, 0), "MainCategories 10-0");
        assert_eq!(main_categories_signature(10, 10), "MainCategories 10-10");
    }

    #[test]
    fn test_main_categories_signature_distinguishes_arguments() {
        assert_ne!(
            main_categories_signature(10, 0),
            main_categories_signature(10, 10)
        );
        assert_ne!(
            main_categories_signature(1, 10),
            main_categories_signature(11, 0)
        );
    }

    #[test]
    fn test_category_signatures() {
        assert_eq!(sub_categories_signature("abcd"), "SubCategories abcd");
        assert_eq!(find_category_signature("abcd"), "Find abcd");
        assert_eq!(ALL_CATEGORIES_SIGNATURE, "All");
    }

    #[test]
    fn test_product_signatures_do_not_collide_with_categories() {
        assert_eq!(find_product_signature("abcd"), "FindOne abcd");
        assert_eq!(
            products_by_category_signature("abcd"),
            "FindByCategoryID abcd"
        );
        assert_ne!(find_product_signature("abcd"), find_category_signature("abcd"));
        assert_ne!(ALL_PRODUCTS_SIGNATURE, ALL_CATEGORIES_SIGNATURE);
    }
}
