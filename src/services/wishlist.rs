//! Wishlist store
//!
//! Sibling of the cart store: product snapshots persisted under the wishlist
//! key through the same adapter, broadcast on the same bus.

use crate::bus::SyncBus;
use crate::domain::aggregates::Product;
use crate::domain::events::StorefrontEvent;
use crate::storage::{keys, KvStore};

pub struct WishlistStore {
    entries: Vec<Product>,
    kv: KvStore,
    bus: SyncBus,
}

impl WishlistStore {
    pub fn new(kv: KvStore, bus: SyncBus) -> Self {
        let entries: Vec<Product> = kv.read(keys::WISHLIST).unwrap_or_default();
        Self { entries, kv, bus }
    }

    pub fn entries(&self) -> &[Product] { &self.entries }

    pub fn contains(&self, product_id: &str) -> bool {
        self.entries.iter().any(|p| p.id == product_id)
    }

    /// Snapshot a product onto the wishlist. Already-listed products are a
    /// no-op.
    pub fn add(&mut self, product: Product) {
        if self.contains(&product.id) {
            return;
        }
        self.entries.push(product);
        self.commit();
    }

    pub fn remove(&mut self, product_id: &str) {
        let before = self.entries.len();
        self.entries.retain(|p| p.id != product_id);
        if self.entries.len() != before {
            self.commit();
        }
    }

    fn commit(&self) {
        self.kv.write(keys::WISHLIST, &self.entries);
        self.bus.publish(&StorefrontEvent::WishlistUpdated { entries: self.entries.clone() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Money;

    fn product(id: &str) -> Product {
        Product::new(id, "Glass Cleaner", Money::from_units(8_000), 25)
    }

    #[test]
    fn test_add_is_deduplicated() {
        let mut wishlist = WishlistStore::new(KvStore::in_memory(), SyncBus::new());
        wishlist.add(product("P1"));
        wishlist.add(product("P1"));
        assert_eq!(wishlist.entries().len(), 1);
        assert!(wishlist.contains("P1"));
    }

    #[test]
    fn test_round_trip() {
        let kv = KvStore::in_memory();
        {
            let mut wishlist = WishlistStore::new(kv.clone(), SyncBus::new());
            wishlist.add(product("P1"));
            wishlist.add(product("P2"));
            wishlist.remove("P1");
        }
        let reloaded = WishlistStore::new(kv, SyncBus::new());
        assert_eq!(reloaded.entries().len(), 1);
        assert!(reloaded.contains("P2"));
    }
}
