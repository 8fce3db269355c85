//! Cache types for catalog API responses.

use fakestore_core::ProductId;

use super::{Product, SortOrder};

/// Cache key, one variant per endpoint.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Products {
        limit: Option<usize>,
        sort: Option<SortOrder>,
    },
    Category(String),
    Categories,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Categories(Vec<String>),
}
