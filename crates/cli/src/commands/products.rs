//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! fakestore products list --limit 5
//! fakestore products list --sort desc
//! fakestore products list --category "women's clothing"
//! fakestore products show 3
//! fakestore products categories
//! ```

use fakestore_core::{Money, ProductId};
use fakestore_storefront::{CatalogClient, CatalogError, Product, SortOrder, StorefrontConfig};

/// List products, optionally filtered by category, limited or sorted.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn list(
    config: &StorefrontConfig,
    limit: Option<usize>,
    category: Option<&str>,
    sort: Option<SortOrder>,
) -> Result<(), CatalogError> {
    let client = CatalogClient::new(&config.catalog)?;

    let products = match (category, limit, sort) {
        (Some(category), _, _) => client.get_by_category(category).await?,
        (None, Some(limit), _) => client.get_limited(limit).await?,
        (None, None, Some(order)) => client.get_sorted(order).await?,
        (None, None, None) => client.get_all().await?,
    };

    tracing::info!(count = products.len(), "Fetched products");

    #[allow(clippy::print_stdout)]
    for product in &products {
        println!("{}", summary_line(product));
    }
    Ok(())
}

/// Show one product in full.
///
/// # Errors
///
/// Returns an error if the product does not exist or the request fails.
pub async fn show(config: &StorefrontConfig, id: ProductId) -> Result<(), CatalogError> {
    let client = CatalogClient::new(&config.catalog)?;
    let product = client.get_by_id(id).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", summary_line(&product));
        println!("  category: {}", product.category);
        if let Some(rating) = product.rating {
            println!("  rating:   {:.1} ({} reviews)", rating.rate, rating.count);
        }
        if !product.image.is_empty() {
            println!("  image:    {}", product.image);
        }
        if !product.description.is_empty() {
            println!();
            println!("{}", product.description);
        }
    }
    Ok(())
}

/// List category names.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn categories(config: &StorefrontConfig) -> Result<(), CatalogError> {
    let client = CatalogClient::new(&config.catalog)?;

    #[allow(clippy::print_stdout)]
    for category in client.get_categories().await? {
        println!("{category}");
    }
    Ok(())
}

/// `#<id>  <price>  <title>`, with the price right-aligned.
fn summary_line(product: &Product) -> String {
    let price = Money::new(product.price)
        .map_or_else(|_| product.price.to_string(), |money| money.to_string());
    format!("#{:<4} {:>9}  {}", product.id.to_string(), price, product.title)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_summary_line() {
        let product = Product {
            id: ProductId::new(1),
            title: "Fjallraven Backpack".to_string(),
            price: Decimal::new(10995, 2),
            description: String::new(),
            category: "men's clothing".to_string(),
            image: String::new(),
            rating: None,
        };

        assert_eq!(summary_line(&product), "#1      $109.95  Fjallraven Backpack");
    }
}
