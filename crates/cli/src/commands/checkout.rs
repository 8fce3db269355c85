//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! fakestore checkout --first-name Ada --last-name Lovelace \
//!     --email ada@example.com --address "12 Analytical Row" \
//!     --city London --state LDN --zip "N1 9GU"
//! ```
//!
//! Orders are accepted locally and numbered `ORD-<unix millis>`; no payment
//! is taken. The cart is emptied once the order is placed.

use fakestore_cart::{
    Cart, CheckoutError, CheckoutSummary, LocalOrderSubmitter, ShippingDetails, checkout,
};

/// Print the order summary, then place the order.
///
/// # Errors
///
/// Returns an error if the cart is empty or the shipping details are
/// incomplete. The cart is kept in that case.
pub fn place_order(cart: &mut Cart, shipping: ShippingDetails) -> Result<(), CheckoutError> {
    let summary = CheckoutSummary::for_state(cart.state());
    let receipt = checkout(cart, &LocalOrderSubmitter, shipping)?;

    #[allow(clippy::print_stdout)]
    {
        for line in summary_lines(&summary) {
            println!("{line}");
        }
        println!();
        println!(
            "Order {} placed at {} ({} item(s))",
            receipt.order_number,
            receipt.placed_at.format("%Y-%m-%d %H:%M:%S UTC"),
            receipt.total_quantity
        );
    }
    Ok(())
}

fn summary_lines(summary: &CheckoutSummary) -> Vec<String> {
    let shipping = if summary.free_shipping() {
        "FREE".to_string()
    } else {
        summary.shipping.to_string()
    };
    vec![
        format!("Subtotal: {:>10}", summary.subtotal.to_string()),
        format!("Shipping: {shipping:>10}"),
        format!("Tax (8%): {:>10}", summary.tax.to_string()),
        format!("Total:    {:>10}", summary.total.to_string()),
    ]
}
