//! Cart store
//!
//! Writer-of-record for cart state. Every mutation goes through here: it
//! validates against the product catalog, mutates the aggregate, persists the
//! full line-item list under the cart key, and broadcasts the updated cart on
//! the sync bus. A failed operation leaves state, storage, and the bus
//! untouched. Other components must never write the cart key directly.

use std::sync::Arc;

use crate::bus::SyncBus;
use crate::catalog::ProductCatalog;
use crate::domain::aggregates::{Cart, LineItem};
use crate::domain::events::StorefrontEvent;
use crate::storage::{keys, KvStore};
use crate::{Result, StoreError};

pub struct CartStore {
    cart: Cart,
    kv: KvStore,
    catalog: Arc<dyn ProductCatalog>,
    bus: SyncBus,
}

impl CartStore {
    /// Hydrate from persisted storage. Missing or corrupt data yields an
    /// empty cart; a damaged payload must never block startup.
    pub fn new(kv: KvStore, catalog: Arc<dyn ProductCatalog>, bus: SyncBus) -> Self {
        let items: Vec<LineItem> = kv.read(keys::CART).unwrap_or_default();
        Self { cart: Cart::from_items(items), kv, catalog, bus }
    }

    pub fn cart(&self) -> &Cart { &self.cart }

    /// Current ordered line items, a read-only snapshot.
    pub fn items(&self) -> &[LineItem] { self.cart.items() }

    /// Add one unit of a product. Increments the existing line item or
    /// inserts a new one with quantity 1. The stock ceiling is enforced on
    /// every add, including the first unit.
    pub fn add(&mut self, product_id: &str) -> Result<()> {
        let product = self
            .catalog
            .find_by_id(product_id)
            .ok_or(StoreError::ProductNotFound)?;
        let wanted = self.cart.quantity_of(product_id) + 1;
        if wanted > product.stock.value() {
            return Err(StoreError::InsufficientStock);
        }
        self.cart.add_one(LineItem {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.primary_image(),
            quantity: 1,
        });
        self.commit();
        Ok(())
    }

    /// Overwrite a line item's quantity; zero or negative removes it. Stock
    /// is not re-checked here, only on `add`.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) {
        let changed = if quantity <= 0 {
            self.cart.remove(product_id)
        } else {
            self.cart.set_quantity(product_id, u32::try_from(quantity).unwrap_or(u32::MAX))
        };
        if changed {
            self.commit();
        }
    }

    /// Remove a line item. Absent items are a no-op, not an error, and
    /// trigger no write or broadcast.
    pub fn remove(&mut self, product_id: &str) {
        if self.cart.remove(product_id) {
            self.commit();
        }
    }

    /// Empty the cart, e.g. after a confirmed checkout.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.commit();
    }

    fn commit(&self) {
        let items = self.cart.items().to_vec();
        self.kv.write(keys::CART, &items);
        self.bus.publish(&StorefrontEvent::CartUpdated { items });
    }
}
