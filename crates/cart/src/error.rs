//! Errors raised at the cart engine's input boundary.
//!
//! Business-rule rejections (decrementing past the floor, unknown IDs) are
//! not errors; see [`crate::Mutation`]. Only malformed input is.

use fakestore_core::{MoneyError, ProductId};
use thiserror::Error;

/// Malformed input handed to the cart engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Product title is empty or whitespace.
    #[error("Product {0} has an empty title")]
    EmptyTitle(ProductId),

    /// Product price is not a valid amount.
    #[error("Product {id} has an invalid price: {source}")]
    InvalidPrice {
        /// Offending product.
        id: ProductId,
        /// Why the price was rejected.
        #[source]
        source: MoneyError,
    },
}
