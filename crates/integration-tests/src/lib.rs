//! Integration tests for Fakestore.
//!
//! # Running Tests
//!
//! ```bash
//! # Offline tests (filesystem only)
//! cargo test -p fakestore-integration-tests
//!
//! # Include the tests that call the live catalog API
//! cargo test -p fakestore-integration-tests -- --include-ignored
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - carts surviving restarts on a real data directory
//! - `checkout_flow` - catalog product to placed order
//! - `catalog_live` - catalog client against `FAKESTORE_API_URL`
