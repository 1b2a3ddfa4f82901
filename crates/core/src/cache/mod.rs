mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    find_category_signature, find_product_signature, main_categories_signature,
    products_by_category_signature, sub_categories_signature, ALL_CATEGORIES_SIGNATURE,
    ALL_PRODUCTS_SIGNATURE,
};
pub use serialization::{decode, encode};
pub use traits::Cache;
