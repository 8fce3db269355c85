//! Domain types for the product catalog API.

use std::fmt;

use fakestore_cart::{CartError, CartProduct};
use fakestore_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Current price. Parsed from a JSON number without going through `f64`
    /// arithmetic.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Option<Rating>,
}

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score out of 5.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

impl Product {
    /// The fields the cart keeps for this product.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the catalog sent a blank title or a
    /// negative price.
    pub fn to_cart_product(&self) -> Result<CartProduct, CartError> {
        let image = (!self.image.is_empty()).then(|| self.image.clone());
        Ok(CartProduct::from_decimal(self.id, self.title.clone(), self.price)?.with_image(image))
    }
}

/// Listing order by product ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("expected 'asc' or 'desc', got '{other}'")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fakestore_core::Money;

    use super::*;

    const BACKPACK: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn test_parse_product() {
        let product: Product = serde_json::from_str(BACKPACK).unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Decimal::new(10995, 2));
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating.unwrap().count, 120);
    }

    #[test]
    fn test_parse_product_without_optional_fields() {
        let product: Product =
            serde_json::from_str(r#"{"id": 21, "title": "Test product", "price": 13.5}"#).unwrap();

        assert!(product.description.is_empty());
        assert!(product.rating.is_none());
    }

    #[test]
    fn test_to_cart_product() {
        let product: Product = serde_json::from_str(BACKPACK).unwrap();
        let item = product.to_cart_product().unwrap();

        assert_eq!(item.id(), ProductId::new(1));
        assert_eq!(item.price(), Money::from_cents(10995));
        assert_eq!(
            item.image(),
            Some("https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg")
        );
    }

    #[test]
    fn test_to_cart_product_rejects_negative_price() {
        let product: Product =
            serde_json::from_str(r#"{"id": 2, "title": "Refund", "price": -1}"#).unwrap();
        assert!(matches!(
            product.to_cart_product(),
            Err(CartError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("random".parse::<SortOrder>().is_err());
    }
}
