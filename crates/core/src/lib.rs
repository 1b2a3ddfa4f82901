//! catalog_core - Domain types, repository traits and cache contracts.
//!
//! Everything in this crate is backend-agnostic. Concrete repositories and
//! cache backends live in the `catalog` crate.

pub mod cache;
pub mod catalog;
pub mod storage;
