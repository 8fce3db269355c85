//! Fakestore Core - Shared types library.
//!
//! This crate provides common types used across all Fakestore components:
//! - `cart` - Client-side cart engine (store, mutations, persistence)
//! - `storefront` - Product catalog API client and configuration
//! - `cli` - Command-line storefront for browsing, cart and checkout
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and money amounts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
