//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the repository traits
//! using `aws-sdk-dynamodb`.

mod client;
mod conversions;
mod error;
mod repository;

pub use client::create_client;
pub use repository::{
    DynamoDbCategoryRepository, DynamoDbProductRepository, CATEGORY_ID_INDEX, ID_NAME_INDEX,
    MAIN_CATEGORY_INDEX, PARENT_CATEGORY_INDEX,
};
