//! CLI command handlers.
//!
//! Each handler returns the text to print on success.

pub mod cart;
pub mod products;
