//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of the repository traits
//! that stores all data in HashMaps wrapped in `Arc<RwLock<_>>`. This is useful
//! for testing and local runs where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
