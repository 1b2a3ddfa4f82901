mod error;
mod operations;
mod requests;
mod types;

pub use error::{CategoryError, ProductError};
pub use operations::{paginate, validate_category, validate_product};
pub use requests::{CreateCategoryRequest, CreateProductRequest};
pub use types::{Category, MultimediaItem, Product, UnitOfMeasurement};
