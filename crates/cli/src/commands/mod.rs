//! Command implementations.

pub mod cart;
pub mod checkout;
pub mod products;

use std::sync::Arc;

use fakestore_cart::{Cart, FileStore, MemoryStore, PersistenceBridge};
use fakestore_storefront::StorefrontConfig;

/// Open the persisted cart.
///
/// The data directory is the durable "local" medium. The "session" medium
/// lives only as long as this process.
pub fn open_cart(config: &StorefrontConfig) -> Cart {
    let local = Arc::new(FileStore::new(config.data_dir.clone()));
    let session = Arc::new(MemoryStore::new());
    let bridge = PersistenceBridge::with_preference(local, session, config.cart_preference);
    tracing::debug!(?bridge, data_dir = %config.data_dir.display(), "Opening cart");
    Cart::open(bridge)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fakestore_cart::{CART_KEY, CartProduct, KeyValueStore, StoragePreference};
    use fakestore_core::{Money, ProductId};

    use super::*;

    fn config(data_dir: &std::path::Path, cart_preference: StoragePreference) -> StorefrontConfig {
        StorefrontConfig {
            catalog: fakestore_storefront::CatalogConfig::default(),
            data_dir: data_dir.to_path_buf(),
            cart_preference,
        }
    }

    #[test]
    fn test_open_cart_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), StoragePreference::Local);
        let widget = CartProduct::new(ProductId::new(1), "Widget", Money::from_cents(1000)).unwrap();

        let mut cart = open_cart(&config);
        cart.add(&widget);
        cart.add(&widget);

        let reopened = open_cart(&config);
        assert_eq!(reopened.state(), cart.state());
        assert_eq!(reopened.total_quantity(), 2);
    }

    #[test]
    fn test_session_preference_does_not_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), StoragePreference::Session);
        let widget = CartProduct::new(ProductId::new(1), "Widget", Money::from_cents(1000)).unwrap();

        let mut cart = open_cart(&config);
        cart.add(&widget);

        assert!(FileStore::new(dir.path()).read(CART_KEY).unwrap().is_none());
        assert!(open_cart(&config).is_empty());
    }
}
