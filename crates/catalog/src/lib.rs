//! catalog - Category and product repositories with time-boxed memoization.
//!
//! Concrete storage backends (DynamoDB, in-memory), the in-memory cache
//! backend, the memoizing repository decorators and the services built on
//! top of them.

pub mod cache;
pub mod cli;
pub mod config;
pub mod services;
pub mod state;
pub mod storage;
