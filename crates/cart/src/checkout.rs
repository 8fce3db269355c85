//! Checkout: order summary and order placement.
//!
//! # Pricing
//!
//! - Subtotal is the cart's total amount.
//! - Shipping is free above $50.00 and a flat $5.99 otherwise.
//! - Tax is a flat 8% of the subtotal.
//!
//! Amounts are kept exact; round only for display.
//!
//! # Placing an order
//!
//! [`checkout`] validates the shipping details, hands an [`OrderRequest`]
//! snapshot to an [`OrderSubmitter`], and clears the cart only once the
//! submitter accepts the order.

use chrono::{DateTime, Utc};
use fakestore_core::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::cart::Cart;
use crate::line_item::LineItem;
use crate::state::CartState;

/// Flat tax rate applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Subtotal above which shipping is free, in cents.
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 5000;

/// Flat shipping fee below the threshold, in cents.
pub const FLAT_SHIPPING_CENTS: i64 = 599;

/// Errors that can occur during checkout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// A required shipping field is blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Contact email is not an address.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// The order service refused the order.
    #[error("Order rejected: {0}")]
    Rejected(String),
}

/// Price breakdown for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

impl CheckoutSummary {
    /// Compute the breakdown for `state`.
    #[must_use]
    pub fn for_state(state: &CartState) -> Self {
        let subtotal = state.total_amount();
        let shipping = if subtotal > Money::from_cents(FREE_SHIPPING_THRESHOLD_CENTS) {
            Money::ZERO
        } else {
            Money::from_cents(FLAT_SHIPPING_CENTS)
        };
        let tax = subtotal.scale(TAX_RATE);

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// `true` when the order ships for free.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Where to ship an order and who to contact about it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl ShippingDetails {
    /// Check that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] for the first blank field, or
    /// [`CheckoutError::InvalidEmail`] if the email has no `@` with text on
    /// both sides.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CheckoutError::MissingField(*field));
        }

        match self.email.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(CheckoutError::InvalidEmail(self.email.clone())),
        }
    }
}

/// A finalized cart snapshot submitted as an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub items: Vec<LineItem>,
    pub total_quantity: u64,
    pub summary: CheckoutSummary,
    pub shipping: ShippingDetails,
}

impl OrderRequest {
    #[must_use]
    pub fn new(state: &CartState, shipping: ShippingDetails) -> Self {
        Self {
            items: state.items().to_vec(),
            total_quantity: state.total_quantity(),
            summary: CheckoutSummary::for_state(state),
            shipping,
        }
    }
}

/// Confirmation of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_number: String,
    pub placed_at: DateTime<Utc>,
    pub total_quantity: u64,
    pub summary: CheckoutSummary,
}

/// The order service.
pub trait OrderSubmitter {
    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Rejected`] if the order is not accepted.
    fn submit(&self, order: &OrderRequest) -> Result<OrderReceipt, CheckoutError>;
}

/// Accepts every order locally, numbering it `ORD-<unix millis>`.
///
/// Stands in for a real order service; no payment is taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalOrderSubmitter;

impl OrderSubmitter for LocalOrderSubmitter {
    fn submit(&self, order: &OrderRequest) -> Result<OrderReceipt, CheckoutError> {
        let placed_at = Utc::now();
        Ok(OrderReceipt {
            order_number: format!("ORD-{}", placed_at.timestamp_millis()),
            placed_at,
            total_quantity: order.total_quantity,
            summary: order.summary,
        })
    }
}

/// Place an order for the cart's contents and clear the cart on success.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart, a validation
/// error for incomplete shipping details, or whatever the submitter
/// returns. The cart is left untouched on any error.
#[instrument(skip_all, fields(items = cart.items().len()))]
pub fn checkout<S: OrderSubmitter + ?Sized>(
    cart: &mut Cart,
    submitter: &S,
    shipping: ShippingDetails,
) -> Result<OrderReceipt, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    shipping.validate()?;

    let order = OrderRequest::new(cart.state(), shipping);
    let receipt = submitter.submit(&order)?;

    cart.clear();
    info!(
        order_number = %receipt.order_number,
        total = %receipt.summary.total,
        "Order placed"
    );
    Ok(receipt)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::str::FromStr;

    use fakestore_core::ProductId;

    use super::*;
    use crate::product::CartProduct;

    struct RejectingSubmitter;

    impl OrderSubmitter for RejectingSubmitter {
        fn submit(&self, _order: &OrderRequest) -> Result<OrderReceipt, CheckoutError> {
            Err(CheckoutError::Rejected("payment declined".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingSubmitter {
        seen: RefCell<Vec<OrderRequest>>,
    }

    impl OrderSubmitter for RecordingSubmitter {
        fn submit(&self, order: &OrderRequest) -> Result<OrderReceipt, CheckoutError> {
            self.seen.borrow_mut().push(order.clone());
            LocalOrderSubmitter.submit(order)
        }
    }

    fn cart_with(cents: i64, quantity: i64) -> Cart {
        let mut cart = Cart::in_memory();
        let product =
            CartProduct::new(ProductId::new(1), "Widget", Money::from_cents(cents)).unwrap();
        cart.add(&product);
        cart.set_quantity(product.id(), quantity);
        cart
    }

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            address: "12 Analytical Row".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            zip_code: "N1 9GU".to_string(),
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_summary_below_threshold_pays_shipping() {
        let summary = CheckoutSummary::for_state(cart_with(1000, 2).state());

        assert_eq!(summary.subtotal, Money::from_cents(2000));
        assert_eq!(summary.shipping, Money::from_cents(599));
        assert_eq!(summary.tax, Money::from_cents(160));
        assert_eq!(summary.total, Money::from_cents(2759));
        assert!(!summary.free_shipping());
    }

    #[test]
    fn test_summary_exactly_fifty_still_pays_shipping() {
        let summary = CheckoutSummary::for_state(cart_with(2500, 2).state());
        assert_eq!(summary.shipping, Money::from_cents(599));
    }

    #[test]
    fn test_summary_above_threshold_ships_free() {
        let summary = CheckoutSummary::for_state(cart_with(10995, 1).state());

        assert!(summary.free_shipping());
        assert_eq!(summary.tax.amount(), dec("8.7960"));
        assert_eq!(summary.total.to_string(), "$118.75");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(CheckoutError::EmptyCart.to_string(), "Cart is empty");
        assert_eq!(
            CheckoutError::MissingField("city").to_string(),
            "Missing required field: city"
        );
        assert_eq!(
            crate::CartError::EmptyTitle(ProductId::new(4)).to_string(),
            "Product 4 has an empty title"
        );
    }

    #[test]
    fn test_validate_shipping() {
        assert_eq!(shipping().validate(), Ok(()));

        let mut missing = shipping();
        missing.city = "  ".to_string();
        assert_eq!(missing.validate(), Err(CheckoutError::MissingField("city")));

        let mut bad_email = shipping();
        bad_email.email = "ada.example.com".to_string();
        assert!(matches!(
            bad_email.validate(),
            Err(CheckoutError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_checkout_clears_cart_on_success() {
        let mut cart = cart_with(1000, 3);
        let submitter = RecordingSubmitter::default();

        let receipt = checkout(&mut cart, &submitter, shipping()).unwrap();

        assert!(receipt.order_number.starts_with("ORD-"));
        assert_eq!(receipt.total_quantity, 3);
        assert_eq!(receipt.summary.subtotal, Money::from_cents(3000));
        assert!(cart.is_empty());

        let seen = submitter.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen.first().unwrap().items.len(), 1);
    }

    #[test]
    fn test_checkout_rejects_empty_cart() {
        let mut cart = Cart::in_memory();
        assert_eq!(
            checkout(&mut cart, &LocalOrderSubmitter, shipping()),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn test_checkout_failure_keeps_cart() {
        let mut cart = cart_with(1000, 2);
        let before = cart.state().clone();

        let result = checkout(&mut cart, &RejectingSubmitter, shipping());
        assert!(matches!(result, Err(CheckoutError::Rejected(_))));
        assert_eq!(cart.state(), &before);

        let mut incomplete = shipping();
        incomplete.zip_code.clear();
        let result = checkout(&mut cart, &LocalOrderSubmitter, incomplete);
        assert_eq!(result, Err(CheckoutError::MissingField("zipCode")));
        assert_eq!(cart.state(), &before);
    }
}
