//! Fakestore storefront library.
//!
//! Everything the storefront needs beyond the cart engine itself:
//! - [`config`] - environment-driven configuration
//! - [`catalog`] - typed, cached client for the public product catalog API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;

pub use catalog::{CatalogClient, CatalogError, Product, Rating, SortOrder};
pub use config::{CatalogConfig, ConfigError, StorefrontConfig};
