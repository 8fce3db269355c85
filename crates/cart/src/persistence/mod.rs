//! Persistence bridge: keeps the cart alive across restarts.
//!
//! # Media
//!
//! The bridge works over two [`KeyValueStore`]s:
//! - **primary** - the preferred medium, written after every mutation
//! - **secondary** - the fallback, read at startup when the primary holds
//!   nothing
//!
//! [`FileStore`] is the long-lived "local" medium and [`MemoryStore`] the
//! process-scoped "session" medium; [`StoragePreference`] picks which one is
//! primary.
//!
//! # Policy
//!
//! - Every mutation except `clear` writes a full snapshot to the primary only.
//! - `clear` deletes the key from both media, so neither can resurrect a stale
//!   cart on the next start.
//! - Everything is best-effort. Read, write and parse failures are logged and
//!   swallowed; the cart keeps working in memory.

mod file;
mod memory;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::state::CartState;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key under which the cart snapshot is stored.
pub const CART_KEY: &str = "cart";

/// Errors raised by a storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains characters the medium cannot store.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Medium is not usable (e.g. disabled or poisoned).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value medium.
///
/// Implementations use interior mutability so a medium can be shared between
/// the bridge and whoever else inspects it.
pub trait KeyValueStore: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be modified.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Which medium the bridge treats as primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoragePreference {
    /// Durable storage first, session storage as fallback.
    #[default]
    Local,
    /// Session storage first, durable storage as fallback.
    Session,
}

impl fmt::Display for StoragePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Session => f.write_str("session"),
        }
    }
}

impl FromStr for StoragePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "session" => Ok(Self::Session),
            other => Err(format!("expected 'local' or 'session', got '{other}'")),
        }
    }
}

/// Synchronizes a [`CartState`] with two storage media.
#[derive(Clone)]
pub struct PersistenceBridge {
    primary: Arc<dyn KeyValueStore>,
    secondary: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for PersistenceBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistenceBridge")
            .field("primary", &self.primary.name())
            .field("secondary", &self.secondary.name())
            .finish()
    }
}

impl PersistenceBridge {
    /// Create a bridge over an explicit primary and secondary medium.
    #[must_use]
    pub fn new(primary: Arc<dyn KeyValueStore>, secondary: Arc<dyn KeyValueStore>) -> Self {
        Self { primary, secondary }
    }

    /// Create a bridge over a local and a session medium, ordered by
    /// `preference`.
    #[must_use]
    pub fn with_preference(
        local: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
        preference: StoragePreference,
    ) -> Self {
        match preference {
            StoragePreference::Local => Self::new(local, session),
            StoragePreference::Session => Self::new(session, local),
        }
    }

    /// Rehydrate the cart.
    ///
    /// Reads the primary medium, falling back to the secondary when the key
    /// is absent or unreadable there. Returns `None` when nothing is stored,
    /// the stored value is empty, or it is not a well-formed cart. An empty
    /// value in the primary does not fall back.
    #[must_use]
    pub fn load(&self) -> Option<CartState> {
        let raw = read_logged(self.primary.as_ref())
            .or_else(|| read_logged(self.secondary.as_ref()))?;
        if raw.is_empty() {
            return None;
        }

        match serde_json::from_str::<CartState>(&raw) {
            Ok(state) => {
                debug!(
                    items = state.len(),
                    total_quantity = state.total_quantity(),
                    "Rehydrated cart"
                );
                Some(state)
            }
            Err(e) => {
                warn!(error = %e, "Discarding malformed stored cart");
                None
            }
        }
    }

    /// Write a snapshot of `state` to the primary medium.
    pub fn save(&self, state: &CartState) {
        let snapshot = match serde_json::to_string(state) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart snapshot");
                return;
            }
        };

        if let Err(e) = self.primary.write(CART_KEY, &snapshot) {
            warn!(medium = self.primary.name(), error = %e, "Failed to persist cart");
        }
    }

    /// Delete the stored cart from both media.
    pub fn forget(&self) {
        for medium in [&self.primary, &self.secondary] {
            if let Err(e) = medium.delete(CART_KEY) {
                warn!(medium = medium.name(), error = %e, "Failed to delete stored cart");
            }
        }
    }
}

fn read_logged(medium: &dyn KeyValueStore) -> Option<String> {
    match medium.read(CART_KEY) {
        Ok(value) => value,
        Err(e) => {
            warn!(medium = medium.name(), error = %e, "Failed to read stored cart");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fakestore_core::{Money, ProductId};

    use super::*;
    use crate::product::CartProduct;

    /// A medium that fails every operation, like storage in a locked-down
    /// browser profile.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn delete(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    fn populated() -> CartState {
        let mut state = CartState::new();
        let widget = CartProduct::new(ProductId::new(1), "Widget", Money::from_cents(1000)).unwrap();
        let gadget = CartProduct::new(ProductId::new(2), "Gadget", Money::from_cents(550)).unwrap();
        state.add(&widget);
        state.add(&widget);
        state.add(&gadget);
        state
    }

    fn media() -> (Arc<MemoryStore>, Arc<MemoryStore>, PersistenceBridge) {
        let primary = Arc::new(MemoryStore::new());
        let secondary = Arc::new(MemoryStore::new());
        let bridge = PersistenceBridge::new(primary.clone(), secondary.clone());
        (primary, secondary, bridge)
    }

    #[test]
    fn test_save_writes_primary_only() {
        let (primary, secondary, bridge) = media();
        bridge.save(&populated());

        assert!(primary.read(CART_KEY).unwrap().is_some());
        assert!(secondary.read(CART_KEY).unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_, _, bridge) = media();
        let state = populated();
        bridge.save(&state);

        assert_eq!(bridge.load(), Some(state));
    }

    #[test]
    fn test_load_falls_back_to_secondary() {
        let (_, secondary, bridge) = media();
        let state = populated();
        secondary
            .write(CART_KEY, &serde_json::to_string(&state).unwrap())
            .unwrap();

        assert_eq!(bridge.load(), Some(state));
    }

    #[test]
    fn test_empty_primary_value_does_not_fall_back() {
        let (primary, secondary, bridge) = media();
        primary.write(CART_KEY, "").unwrap();
        secondary
            .write(CART_KEY, &serde_json::to_string(&populated()).unwrap())
            .unwrap();

        assert_eq!(bridge.load(), None);
    }

    #[test]
    fn test_load_prefers_primary() {
        let (primary, secondary, bridge) = media();
        let state = populated();
        primary
            .write(CART_KEY, &serde_json::to_string(&state).unwrap())
            .unwrap();
        secondary
            .write(CART_KEY, &serde_json::to_string(&CartState::new()).unwrap())
            .unwrap();

        assert_eq!(bridge.load(), Some(state));
    }

    #[test]
    fn test_load_missing_or_corrupt_yields_none() {
        let (primary, _, bridge) = media();
        assert_eq!(bridge.load(), None);

        primary.write(CART_KEY, "{not json").unwrap();
        assert_eq!(bridge.load(), None);

        primary.write(CART_KEY, r#"{"items": "nope"}"#).unwrap();
        assert_eq!(bridge.load(), None);

        primary.write(CART_KEY, r#"{"totalQuantity": 3}"#).unwrap();
        assert_eq!(bridge.load(), None);

        primary
            .write(
                CART_KEY,
                r#"{"items":[{"id":1,"title":"W","price":-10,"quantity":2,"totalPrice":-20}]}"#,
            )
            .unwrap();
        assert_eq!(bridge.load(), None);
    }

    #[test]
    fn test_forget_deletes_both_media() {
        let (primary, secondary, bridge) = media();
        primary.write(CART_KEY, "{}").unwrap();
        secondary.write(CART_KEY, "{}").unwrap();

        bridge.forget();

        assert!(primary.read(CART_KEY).unwrap().is_none());
        assert!(secondary.read(CART_KEY).unwrap().is_none());
    }

    #[test]
    fn test_broken_media_are_swallowed() {
        let bridge = PersistenceBridge::new(Arc::new(BrokenStore), Arc::new(BrokenStore));

        bridge.save(&populated());
        bridge.forget();
        assert_eq!(bridge.load(), None);
    }

    #[test]
    fn test_broken_primary_falls_back_on_read() {
        let secondary = Arc::new(MemoryStore::new());
        let state = populated();
        secondary
            .write(CART_KEY, &serde_json::to_string(&state).unwrap())
            .unwrap();
        let bridge = PersistenceBridge::new(Arc::new(BrokenStore), secondary);

        assert_eq!(bridge.load(), Some(state));
    }

    #[test]
    fn test_with_preference_orders_media() {
        let local = Arc::new(MemoryStore::new());
        let session = Arc::new(MemoryStore::new());
        let bridge =
            PersistenceBridge::with_preference(local.clone(), session.clone(), StoragePreference::Session);

        bridge.save(&populated());

        assert!(session.read(CART_KEY).unwrap().is_some());
        assert!(local.read(CART_KEY).unwrap().is_none());
    }

    #[test]
    fn test_storage_preference_from_str() {
        assert_eq!("local".parse::<StoragePreference>(), Ok(StoragePreference::Local));
        assert_eq!(" Session ".parse::<StoragePreference>(), Ok(StoragePreference::Session));
        assert!("cookie".parse::<StoragePreference>().is_err());
    }
}
