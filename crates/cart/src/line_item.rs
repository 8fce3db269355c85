//! Cart line items.

use fakestore_core::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::product::CartProduct;

/// One product entry in the cart with its own quantity and subtotal.
///
/// `line_total` is stored alongside `unit_price × quantity` and adjusted
/// incrementally by the mutation protocol; [`LineItem::is_consistent`]
/// checks the two agree.
///
/// Serialized with the field names of the persisted cart layout: `price`
/// for the unit price and `totalPrice` for the line total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub(crate) id: ProductId,
    pub(crate) title: String,
    #[serde(rename = "price")]
    pub(crate) unit_price: Money,
    pub(crate) quantity: u32,
    #[serde(rename = "totalPrice")]
    pub(crate) line_total: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) image: Option<String>,
}

impl LineItem {
    /// A fresh line with quantity 1, priced at the product's current price.
    pub(crate) fn first_unit(product: &CartProduct) -> Self {
        Self {
            id: product.id(),
            title: product.title().to_owned(),
            unit_price: product.price(),
            quantity: 1,
            line_total: product.price(),
            image: product.image().map(str::to_owned),
        }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Price per unit, fixed when the item was first added.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Subtotal for this line.
    #[must_use]
    pub const fn line_total(&self) -> Money {
        self.line_total
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// `true` when the stored line total equals `unit_price × quantity`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.unit_price.checked_mul(self.quantity) == Some(self.line_total)
    }
}
