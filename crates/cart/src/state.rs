//! The cart store: line items plus their aggregate quantity and amount.
//!
//! `CartState` is read-only outside this crate. All changes go through the
//! operations in [`crate::mutation`], each of which updates the items and
//! both aggregates in one call, so the invariants
//!
//! - `total_quantity == Σ items.quantity`
//! - `total_amount == Σ items.line_total`
//! - every item has `quantity >= 1` and `line_total == unit_price × quantity`
//!
//! hold at every point a caller can observe.

use std::collections::HashSet;

use fakestore_core::{Money, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::line_item::LineItem;

/// A persisted snapshot that cannot be turned back into a cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// An item was stored with quantity zero.
    #[error("Item {0} has quantity 0")]
    ZeroQuantity(ProductId),

    /// The same product appears on two lines.
    #[error("Item {0} appears more than once")]
    DuplicateItem(ProductId),

    /// A line total or the cart total does not fit in a `Money`.
    #[error("Amount overflow at item {0}")]
    AmountOverflow(ProductId),
}

/// Authoritative cart contents.
///
/// Items keep insertion order: the first product added stays first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PersistedCart")]
pub struct CartState {
    pub(crate) items: Vec<LineItem>,
    pub(crate) total_quantity: u64,
    pub(crate) total_amount: Money,
}

/// Wire shape of a stored cart. Only `items` is required; older snapshots
/// also carry UI fields (`loading`, `error`) which are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedCart {
    items: Vec<LineItem>,
    #[serde(default)]
    total_quantity: Option<u64>,
    #[serde(default)]
    total_amount: Option<Money>,
}

impl TryFrom<PersistedCart> for CartState {
    type Error = SnapshotError;

    fn try_from(persisted: PersistedCart) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(persisted.items.len());
        let mut items = persisted.items;
        let mut total_amount = Money::ZERO;

        for item in &mut items {
            if item.quantity == 0 {
                return Err(SnapshotError::ZeroQuantity(item.id));
            }
            if !seen.insert(item.id) {
                return Err(SnapshotError::DuplicateItem(item.id));
            }
            let line_total = item
                .unit_price
                .checked_mul(item.quantity)
                .ok_or(SnapshotError::AmountOverflow(item.id))?;
            if item.line_total != line_total {
                tracing::warn!(
                    product_id = %item.id,
                    stored = %item.line_total,
                    "Stored line total disagrees with price × quantity, recomputing"
                );
                item.line_total = line_total;
            }
            total_amount = total_amount
                .checked_add(line_total)
                .ok_or(SnapshotError::AmountOverflow(item.id))?;
        }

        let state = Self {
            total_quantity: items.iter().map(|i| u64::from(i.quantity)).sum(),
            items,
            total_amount,
        };

        if persisted.total_quantity.is_some_and(|q| q != state.total_quantity)
            || persisted.total_amount.is_some_and(|a| a != state.total_amount)
        {
            tracing::warn!(
                total_quantity = state.total_quantity,
                total_amount = %state.total_amount,
                "Stored cart totals disagree with items, using recomputed totals"
            );
        }

        Ok(state)
    }
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Sum of all line quantities.
    #[must_use]
    pub const fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    /// Sum of all line totals.
    #[must_use]
    pub const fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check every cart invariant. Used by tests and debug assertions.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let quantity: u64 = self.items.iter().map(|i| u64::from(i.quantity)).sum();
        let amount = self
            .items
            .iter()
            .try_fold(Money::ZERO, |sum, i| sum.checked_add(i.line_total));

        quantity == self.total_quantity
            && amount == Some(self.total_amount)
            && self
                .items
                .iter()
                .all(|item| item.quantity >= 1 && item.is_consistent())
    }

    pub(crate) fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub(crate) fn recompute_amount(&mut self) {
        self.total_amount = self.items.iter().map(|item| item.line_total).sum();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let state = CartState::new();
        assert!(state.is_empty());
        assert_eq!(state.total_quantity(), 0);
        assert_eq!(state.total_amount(), Money::ZERO);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_serialized_layout() {
        let json = serde_json::to_value(CartState::new()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "items": [], "totalQuantity": 0, "totalAmount": 0.0 })
        );
    }

    #[test]
    fn test_deserialize_recomputes_totals() {
        let raw = r#"{
            "items": [
                {"id": 1, "title": "Widget", "price": 10, "quantity": 2, "totalPrice": 20},
                {"id": 2, "title": "Gadget", "price": 5, "quantity": 1, "totalPrice": 5}
            ],
            "totalQuantity": 99,
            "totalAmount": 1,
            "loading": false,
            "error": null
        }"#;
        let state: CartState = serde_json::from_str(raw).unwrap();

        assert_eq!(state.total_quantity(), 3);
        assert_eq!(state.total_amount(), Money::from_cents(2500));
        assert!(state.is_consistent());
    }

    #[test]
    fn test_deserialize_repairs_drifted_line_total() {
        let raw = r#"{"items": [
            {"id": 1, "title": "Widget", "price": 0.1, "quantity": 3, "totalPrice": 0.30000000000000004}
        ]}"#;
        let state: CartState = serde_json::from_str(raw).unwrap();

        assert_eq!(state.items()[0].line_total(), Money::from_cents(30));
        assert!(state.is_consistent());
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let raw = r#"{"items": [{"id": 1, "title": "W", "price": 1, "quantity": 0, "totalPrice": 0}]}"#;
        assert!(serde_json::from_str::<CartState>(raw).is_err());
    }

    #[test]
    fn test_deserialize_rejects_negative_price() {
        let raw = r#"{"items": [{"id": 1, "title": "W", "price": -10, "quantity": 2, "totalPrice": -20}]}"#;
        assert!(serde_json::from_str::<CartState>(raw).is_err());

        let raw = r#"{"items": [{"id": 1, "title": "W", "price": 10, "quantity": 2, "totalPrice": -20}]}"#;
        assert!(serde_json::from_str::<CartState>(raw).is_err());
    }

    #[test]
    fn test_deserialize_rejects_amount_overflow() {
        let raw = r#"{"items": [
            {"id": 1, "title": "W", "price": 1e28, "quantity": 9, "totalPrice": 0}
        ]}"#;
        assert!(serde_json::from_str::<CartState>(raw).is_err());

        let raw = r#"{"items": [
            {"id": 1, "title": "W", "price": 5e28, "quantity": 1, "totalPrice": 5e28},
            {"id": 2, "title": "G", "price": 5e28, "quantity": 1, "totalPrice": 5e28}
        ]}"#;
        assert!(serde_json::from_str::<CartState>(raw).is_err());
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let raw = r#"{"items": [
            {"id": 1, "title": "W", "price": 1, "quantity": 1, "totalPrice": 1},
            {"id": 1, "title": "W", "price": 1, "quantity": 1, "totalPrice": 1}
        ]}"#;
        assert!(serde_json::from_str::<CartState>(raw).is_err());
    }

    #[test]
    fn test_deserialize_requires_items_array() {
        assert!(serde_json::from_str::<CartState>(r#"{"totalQuantity": 0}"#).is_err());
        assert!(serde_json::from_str::<CartState>(r#"{"items": {}}"#).is_err());
        assert!(serde_json::from_str::<CartState>("null").is_err());
    }
}
