//! Integration tests against the live catalog API.
//!
//! These tests require network access to `FAKESTORE_API_URL`
//! (default <https://fakestoreapi.com>).
//!
//! Run with: cargo test -p fakestore-integration-tests -- --include-ignored

use fakestore_core::ProductId;
use fakestore_storefront::{CatalogClient, CatalogError, SortOrder, StorefrontConfig};

fn client() -> CatalogClient {
    let config = StorefrontConfig::from_env().expect("valid configuration");
    CatalogClient::new(&config.catalog).expect("catalog client")
}

#[tokio::test]
#[ignore = "Requires network access to the catalog API"]
async fn test_get_categories() {
    let categories = client().get_categories().await.expect("categories");
    assert!(!categories.is_empty());
    assert!(categories.iter().any(|c| c == "electronics"));
}

#[tokio::test]
#[ignore = "Requires network access to the catalog API"]
async fn test_get_limited_and_sorted() {
    let client = client();

    let limited = client.get_limited(3).await.expect("limited products");
    assert_eq!(limited.len(), 3);

    let sorted = client.get_sorted(SortOrder::Desc).await.expect("sorted products");
    let ids: Vec<ProductId> = sorted.iter().map(|p| p.id).collect();
    let mut expected = ids.clone();
    expected.sort_by(|a, b| b.cmp(a));
    assert_eq!(ids, expected);
}

#[tokio::test]
#[ignore = "Requires network access to the catalog API"]
async fn test_product_converts_to_cart_product() {
    let product = client().get_by_id(ProductId::new(1)).await.expect("product 1");
    let item = product.to_cart_product().expect("cartable product");

    assert_eq!(item.id(), ProductId::new(1));
    assert!(!item.title().is_empty());
}

#[tokio::test]
#[ignore = "Requires network access to the catalog API"]
async fn test_unknown_product_is_not_found() {
    let result = client().get_by_id(ProductId::new(999_999)).await;
    assert!(matches!(result, Err(CatalogError::NotFound(_))));
}
