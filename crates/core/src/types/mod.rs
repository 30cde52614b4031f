//! Core types for Vitrine.
//!
//! This module provides type-safe wrappers for the storefront domain.

pub mod cart;
pub mod id;
pub mod image;
pub mod product;

pub use cart::{CartLine, CartTotals};
pub use id::{ProductId, ProductIdError};
pub use image::placeholder_image_url;
pub use product::Product;
