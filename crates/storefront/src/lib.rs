//! Vitrine Storefront library.
//!
//! Catalog and cart stores with their persistence and catalog provider,
//! usable from any view layer (the `vitrine` CLI is one).
//!
//! # Modules
//!
//! - [`catalog`] - Catalog loading, filtering and product lookup
//! - [`cart`] - Cart mutations, invariants and the persistence codec
//! - [`storage`] - Key-value backends for cart state
//! - [`config`] - Environment configuration
//! - [`error`] - Unified error type with Sentry capture
//! - [`state`] - Catalog, provider and cart wired together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod lenient;
pub mod state;
pub mod storage;

pub use cart::{CartChange, CartError, CartStore};
pub use catalog::{ALL_CATEGORIES, CatalogSource, CatalogStore, HttpCatalogSource, LoadError, ProductLookup};
pub use error::AppError;
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
