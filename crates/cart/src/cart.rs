//! The cart engine: a [`CartState`] wired to a [`PersistenceBridge`].
//!
//! Every operation applies one mutation to the store and then persists:
//! `clear` deletes the stored cart from both media, everything else writes a
//! snapshot to the primary medium. Persistence never changes the outcome of
//! a mutation.

use std::sync::{Arc, Mutex, PoisonError};

use fakestore_core::{Money, ProductId};
use tracing::debug;

use crate::line_item::LineItem;
use crate::mutation::Mutation;
use crate::persistence::PersistenceBridge;
use crate::product::CartProduct;
use crate::state::CartState;

/// A cart instance.
///
/// Construct one per client with [`Cart::open`] (persisted) or
/// [`Cart::in_memory`] (tests, previews). Instances share nothing.
#[derive(Debug, Default)]
pub struct Cart {
    state: CartState,
    persistence: Option<PersistenceBridge>,
}

impl Cart {
    /// A cart with no persistence.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Rehydrate a cart from `persistence`, starting empty when nothing
    /// usable is stored.
    #[must_use]
    pub fn open(persistence: PersistenceBridge) -> Self {
        let state = persistence.load().unwrap_or_default();
        Self {
            state,
            persistence: Some(persistence),
        }
    }

    /// Read access to the store.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.state.get(id)
    }

    #[must_use]
    pub const fn total_quantity(&self) -> u64 {
        self.state.total_quantity()
    }

    #[must_use]
    pub const fn total_amount(&self) -> Money {
        self.state.total_amount()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Add one unit of `product`, appending a new line if needed.
    pub fn add(&mut self, product: &CartProduct) -> Mutation {
        let outcome = self.state.add(product);
        self.record("add", product.id(), outcome);
        outcome
    }

    /// Remove the line for `id`.
    pub fn remove(&mut self, id: ProductId) -> Mutation {
        let outcome = self.state.remove(id);
        self.record("remove", id, outcome);
        outcome
    }

    /// Set the quantity of the line for `id`. Non-positive targets are
    /// ignored.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> Mutation {
        let outcome = self.state.set_quantity(id, quantity);
        self.record("set_quantity", id, outcome);
        outcome
    }

    /// Add one unit to the line for `id`.
    pub fn increment(&mut self, id: ProductId) -> Mutation {
        let outcome = self.state.increment(id);
        self.record("increment", id, outcome);
        outcome
    }

    /// Take one unit from the line for `id`, never going below 1.
    pub fn decrement(&mut self, id: ProductId) -> Mutation {
        let outcome = self.state.decrement(id);
        self.record("decrement", id, outcome);
        outcome
    }

    /// Empty the cart and delete it from every storage medium.
    pub fn clear(&mut self) -> Mutation {
        let outcome = self.state.clear();
        debug!("Cart cleared");
        if let Some(persistence) = &self.persistence {
            persistence.forget();
        }
        outcome
    }

    /// Consume the cart, returning its state.
    #[must_use]
    pub fn into_state(self) -> CartState {
        self.state
    }

    fn record(&self, operation: &'static str, id: ProductId, outcome: Mutation) {
        debug_assert!(self.state.is_consistent());
        match outcome {
            Mutation::Applied => debug!(
                operation,
                product_id = %id,
                total_quantity = self.state.total_quantity(),
                total_amount = %self.state.total_amount(),
                "Cart mutation applied"
            ),
            Mutation::Ignored(reason) => {
                debug!(operation, product_id = %id, ?reason, "Cart mutation ignored");
            }
        }
        if let Some(persistence) = &self.persistence {
            persistence.save(&self.state);
        }
    }
}

/// A [`Cart`] shared between threads.
///
/// One mutex guards the whole mutation protocol, so each operation
/// (mutate, recompute, persist) is atomic with respect to the others.
#[derive(Debug, Clone, Default)]
pub struct SharedCart {
    inner: Arc<Mutex<Cart>>,
}

impl SharedCart {
    #[must_use]
    pub fn new(cart: Cart) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cart)),
        }
    }

    /// Run `f` with exclusive access to the cart.
    pub fn with<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> R {
        // A panic inside `f` cannot leave the state half-mutated: every
        // operation finishes its state change before logging or persisting.
        let mut cart = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.with(|cart| cart.state().clone())
    }
}

impl From<Cart> for SharedCart {
    fn from(cart: Cart) -> Self {
        Self::new(cart)
    }
}
