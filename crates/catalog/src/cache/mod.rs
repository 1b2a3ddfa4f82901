//! Cache backend implementations.
//!
//! This module provides concrete implementations of the cache trait defined
//! in `catalog_core::cache`.

pub mod memory;

pub use memory::MemoryCache;
