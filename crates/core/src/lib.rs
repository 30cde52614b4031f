//! Vitrine Core - Shared types library.
//!
//! This crate provides the domain types used across the Vitrine components:
//! - `storefront` - Catalog and cart stores, persistence, catalog provider
//! - `cli` - Terminal view layer driving the stores
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no storage,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, catalog products, cart lines and totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
