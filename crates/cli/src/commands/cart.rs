//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! fakestore cart add 3      # fetch product 3 and add one unit
//! fakestore cart set 3 4    # set its quantity to 4
//! fakestore cart inc 3
//! fakestore cart dec 3      # never goes below 1; use `remove`
//! fakestore cart remove 3
//! fakestore cart clear
//! fakestore cart show
//! ```
//!
//! Every command prints the cart afterwards.

use fakestore_cart::{Cart, CartError, Mutation};
use fakestore_core::ProductId;
use fakestore_storefront::{CatalogClient, CatalogError, StorefrontConfig};
use thiserror::Error;

/// Errors that can occur while adding to the cart.
#[derive(Debug, Error)]
pub enum AddError {
    /// Product lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Catalog returned a product the cart cannot hold.
    #[error(transparent)]
    Product(#[from] CartError),
}

/// Look `id` up in the catalog and add one unit of it.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched or is not cartable.
pub async fn add(config: &StorefrontConfig, cart: &mut Cart, id: ProductId) -> Result<(), AddError> {
    let client = CatalogClient::new(&config.catalog)?;
    let product = client.get_by_id(id).await?.to_cart_product()?;

    report(cart.add(&product));
    Ok(())
}

/// Log what a mutation did.
pub fn report(outcome: Mutation) {
    match outcome {
        Mutation::Applied => tracing::info!("Cart updated"),
        Mutation::Ignored(reason) => tracing::warn!("Nothing changed: {reason}"),
    }
}

/// Print the cart's lines and totals.
pub fn print(cart: &Cart) {
    #[allow(clippy::print_stdout)]
    {
        for line in render(cart) {
            println!("{line}");
        }
    }
}

fn render(cart: &Cart) -> Vec<String> {
    if cart.is_empty() {
        return vec!["Cart is empty".to_string()];
    }

    let mut lines: Vec<String> = cart
        .items()
        .iter()
        .map(|item| {
            format!(
                "#{:<4} {:>3} x {:>9} = {:>9}  {}",
                item.id().to_string(),
                item.quantity(),
                item.unit_price().to_string(),
                item.line_total().to_string(),
                item.title()
            )
        })
        .collect();
    lines.push(format!(
        "{} item(s), total {}",
        cart.total_quantity(),
        cart.total_amount()
    ));
    lines
}
