//! The mutation protocol.
//!
//! Each operation is one atomic transition of a [`CartState`]. Guard
//! violations (unknown product, decrement at the floor, non-positive
//! quantity) leave the state untouched and report
//! [`Mutation::Ignored`]; they are never errors.
//!
//! `remove` recomputes `total_amount` from the remaining line totals; the
//! other operations adjust it by the change in one line total. Growing a
//! total is checked arithmetic, and an operation whose line or cart total
//! would overflow is ignored.

use fakestore_core::{Money, ProductId};

use crate::line_item::LineItem;
use crate::product::CartProduct;
use crate::state::CartState;

/// Result of applying one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The state changed.
    Applied,
    /// A guard rejected the operation; the state is unchanged.
    Ignored(IgnoreReason),
}

impl Mutation {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Why an operation was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No line exists for the product.
    NotInCart(ProductId),
    /// `set_quantity` with zero or a negative value. Use `remove` instead.
    NonPositiveQuantity(i64),
    /// `decrement` on a line at quantity 1. Use `remove` instead.
    AtMinimumQuantity(ProductId),
    /// The line's quantity cannot grow any further.
    QuantityOverflow(ProductId),
    /// The resulting line or cart total would not fit in a `Money`.
    AmountOverflow(ProductId),
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInCart(id) => write!(f, "product {id} is not in the cart"),
            Self::NonPositiveQuantity(quantity) => {
                write!(f, "quantity must be positive, got {quantity}")
            }
            Self::AtMinimumQuantity(id) => {
                write!(f, "product {id} is already at quantity 1")
            }
            Self::QuantityOverflow(id) => write!(f, "quantity of product {id} is at its maximum"),
            Self::AmountOverflow(id) => {
                write!(f, "cart total would overflow for product {id}")
            }
        }
    }
}

impl CartState {
    /// Add one unit of `product`.
    ///
    /// A product already in the cart keeps the unit price it was first added
    /// at; a different incoming price is ignored for the existing line.
    pub(crate) fn add(&mut self, product: &CartProduct) -> Mutation {
        match self.position(product.id()) {
            Some(index) => {
                let Some(item) = self.items.get_mut(index) else {
                    return Mutation::Ignored(IgnoreReason::NotInCart(product.id()));
                };
                let Some(quantity) = item.quantity.checked_add(1) else {
                    return Mutation::Ignored(IgnoreReason::QuantityOverflow(item.id));
                };
                let Some(line_total) = item.line_total.checked_add(item.unit_price) else {
                    return Mutation::Ignored(IgnoreReason::AmountOverflow(item.id));
                };
                let Some(total_amount) = self.total_amount.checked_add(item.unit_price) else {
                    return Mutation::Ignored(IgnoreReason::AmountOverflow(item.id));
                };
                if item.unit_price != product.price() {
                    tracing::debug!(
                        product_id = %item.id,
                        stored = %item.unit_price,
                        incoming = %product.price(),
                        "Keeping original unit price for existing line"
                    );
                }
                item.quantity = quantity;
                item.line_total = line_total;
                self.total_amount = total_amount;
            }
            None => {
                let Some(total_amount) = self.total_amount.checked_add(product.price()) else {
                    return Mutation::Ignored(IgnoreReason::AmountOverflow(product.id()));
                };
                self.items.push(LineItem::first_unit(product));
                self.total_amount = total_amount;
            }
        }

        self.total_quantity += 1;
        Mutation::Applied
    }

    /// Drop the line for `id`.
    pub(crate) fn remove(&mut self, id: ProductId) -> Mutation {
        let Some(index) = self.position(id) else {
            return Mutation::Ignored(IgnoreReason::NotInCart(id));
        };

        let removed = self.items.remove(index);
        self.total_quantity -= u64::from(removed.quantity);
        self.recompute_amount();
        Mutation::Applied
    }

    /// Set the quantity of an existing line. Zero and negative targets are
    /// refused; removing a line goes through [`CartState::remove`].
    pub(crate) fn set_quantity(&mut self, id: ProductId, quantity: i64) -> Mutation {
        if quantity <= 0 {
            return Mutation::Ignored(IgnoreReason::NonPositiveQuantity(quantity));
        }
        let Ok(quantity) = u32::try_from(quantity) else {
            return Mutation::Ignored(IgnoreReason::QuantityOverflow(id));
        };
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return Mutation::Ignored(IgnoreReason::NotInCart(id));
        };
        let Some(line_total) = item.unit_price.checked_mul(quantity) else {
            return Mutation::Ignored(IgnoreReason::AmountOverflow(id));
        };
        let Some(total_amount) = (self.total_amount - item.line_total).checked_add(line_total)
        else {
            return Mutation::Ignored(IgnoreReason::AmountOverflow(id));
        };

        self.total_quantity = self.total_quantity - u64::from(item.quantity) + u64::from(quantity);
        item.quantity = quantity;
        item.line_total = line_total;
        self.total_amount = total_amount;
        Mutation::Applied
    }

    /// One more unit of an existing line.
    pub(crate) fn increment(&mut self, id: ProductId) -> Mutation {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return Mutation::Ignored(IgnoreReason::NotInCart(id));
        };
        let Some(quantity) = item.quantity.checked_add(1) else {
            return Mutation::Ignored(IgnoreReason::QuantityOverflow(id));
        };
        let (Some(line_total), Some(total_amount)) = (
            item.line_total.checked_add(item.unit_price),
            self.total_amount.checked_add(item.unit_price),
        ) else {
            return Mutation::Ignored(IgnoreReason::AmountOverflow(id));
        };

        item.quantity = quantity;
        item.line_total = line_total;
        self.total_quantity += 1;
        self.total_amount = total_amount;
        Mutation::Applied
    }

    /// One fewer unit of an existing line. Never drops a line below 1.
    pub(crate) fn decrement(&mut self, id: ProductId) -> Mutation {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return Mutation::Ignored(IgnoreReason::NotInCart(id));
        };
        if item.quantity <= 1 {
            return Mutation::Ignored(IgnoreReason::AtMinimumQuantity(id));
        }

        item.quantity -= 1;
        item.line_total -= item.unit_price;
        self.total_quantity -= 1;
        self.total_amount -= item.unit_price;
        Mutation::Applied
    }

    /// Empty the cart. Idempotent.
    pub(crate) fn clear(&mut self) -> Mutation {
        self.items.clear();
        self.total_quantity = 0;
        self.total_amount = Money::ZERO;
        Mutation::Applied
    }
}
