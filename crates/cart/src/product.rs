//! Validated product input for [`crate::Cart::add`].

use fakestore_core::{Money, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CartError;

/// The subset of a catalog product the cart needs.
///
/// Constructed through [`CartProduct::new`] or [`CartProduct::from_decimal`],
/// both of which validate the input, so a `CartProduct` always has a
/// non-empty title and a non-negative price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCartProduct")]
pub struct CartProduct {
    id: ProductId,
    title: String,
    price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

#[derive(Deserialize)]
struct RawCartProduct {
    id: ProductId,
    title: String,
    price: Money,
    #[serde(default)]
    image: Option<String>,
}

impl TryFrom<RawCartProduct> for CartProduct {
    type Error = CartError;

    fn try_from(raw: RawCartProduct) -> Result<Self, Self::Error> {
        Self::from_decimal(raw.id, raw.title, raw.price.amount()).map(|p| p.with_image(raw.image))
    }
}

impl CartProduct {
    /// Build a product from an already-valid price.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyTitle`] if `title` is blank.
    pub fn new(id: ProductId, title: impl Into<String>, price: Money) -> Result<Self, CartError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CartError::EmptyTitle(id));
        }
        Ok(Self {
            id,
            title,
            price,
            image: None,
        })
    }

    /// Build a product from a raw decimal price, as delivered by the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidPrice`] for a negative price and
    /// [`CartError::EmptyTitle`] for a blank title.
    pub fn from_decimal(
        id: ProductId,
        title: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, CartError> {
        let price = Money::new(price).map_err(|source| CartError::InvalidPrice { id, source })?;
        Self::new(id, title, price)
    }

    /// Attach a display image URL.
    #[must_use]
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image.filter(|url| !url.is_empty());
        self
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}
