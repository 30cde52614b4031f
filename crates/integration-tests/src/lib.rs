//! Integration tests for Vitrine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Catalog and cart driven together through `AppState`
//! - `file_persistence` - Cart state surviving a restart on disk
//! - `http_catalog` - The HTTP catalog provider against a local server
//!
//! The tests need no external services: the HTTP provider is exercised
//! against a throwaway listener on `127.0.0.1`.
