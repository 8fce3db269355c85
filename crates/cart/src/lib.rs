//! Fakestore cart engine.
//!
//! Keeps a consistent, persisted ledger of cart contents for a single
//! storefront client.
//!
//! # Architecture
//!
//! - [`state`] - `CartState`, the authoritative in-memory store of line items
//!   and their aggregate quantity and amount
//! - [`mutation`] - the fixed set of operations that transform a `CartState`
//!   while keeping its aggregates consistent
//! - [`persistence`] - the bridge that writes a snapshot after every mutation
//!   and rehydrates the cart at startup, over two key-value media
//! - [`cart`] - `Cart`, which ties the store to the persistence bridge
//! - [`checkout`] - order summary (shipping, flat-rate tax) and order placement
//!
//! # Example
//!
//! ```rust
//! use fakestore_cart::{Cart, CartProduct};
//! use fakestore_core::{Money, ProductId};
//!
//! let mut cart = Cart::in_memory();
//! let widget = CartProduct::new(ProductId::new(1), "Widget", Money::from_cents(1000))?;
//!
//! cart.add(&widget);
//! cart.add(&widget);
//!
//! assert_eq!(cart.total_quantity(), 2);
//! assert_eq!(cart.total_amount(), Money::from_cents(2000));
//! # Ok::<(), fakestore_cart::CartError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod error;
pub mod line_item;
pub mod mutation;
pub mod persistence;
pub mod product;
pub mod state;

pub use cart::{Cart, SharedCart};
pub use checkout::{
    CheckoutError, CheckoutSummary, LocalOrderSubmitter, OrderReceipt, OrderRequest,
    OrderSubmitter, ShippingDetails, checkout,
};
pub use error::CartError;
pub use line_item::LineItem;
pub use mutation::{IgnoreReason, Mutation};
pub use persistence::{
    CART_KEY, FileStore, KeyValueStore, MemoryStore, PersistenceBridge, StorageError,
    StoragePreference,
};
pub use product::CartProduct;
pub use state::{CartState, SnapshotError};
