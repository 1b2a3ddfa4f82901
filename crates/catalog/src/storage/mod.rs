//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository traits
//! defined in `catalog_core::storage`, plus the caching decorators that wrap
//! any of them.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB storage backend using `aws-sdk-dynamodb`
//!
//! The in-memory backend is always available.

pub mod cached;
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use cached::{CachedCategoryRepository, CachedProductRepository};
pub use inmemory::InMemoryRepository;

#[cfg(feature = "dynamodb")]
pub use dynamodb::{DynamoDbCategoryRepository, DynamoDbProductRepository};
