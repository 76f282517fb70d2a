//! Cart Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::value_objects::Money;

/// One product's presence in the cart.
///
/// `image` is an opaque display reference; pricing never looks at it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub image: String,
    pub quantity: u32,
}

impl LineItem {
    pub fn line_total(&self) -> Money { self.price.multiply(self.quantity) }
}

/// Ordered collection of line items.
///
/// Insertion order is preserved but not significant to pricing. At most one
/// LineItem exists per product id; a quantity of zero means the item is
/// removed, never stored.
#[derive(Clone, Debug)]
pub struct Cart {
    items: Vec<LineItem>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        let now = Utc::now();
        Self { items: vec![], created_at: now, updated_at: now }
    }

    /// Rebuild a cart from previously persisted line items.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        cart.items = items;
        cart
    }

    pub fn items(&self) -> &[LineItem] { &self.items }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn item_count(&self) -> usize { self.items.len() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    pub fn total_units(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items.iter().find(|i| i.id == product_id).map_or(0, |i| i.quantity)
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().fold(Money::zero(), |acc, i| acc + i.line_total())
    }

    /// Merge one unit into the cart: increments an existing line item or
    /// appends a new one at the end.
    pub fn add_one(&mut self, item: LineItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
        self.touch();
    }

    /// Overwrite a line item's quantity. Zero removes the line item.
    /// Returns false when no matching line item exists.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id);
        }
        match self.items.iter_mut().find(|i| i.id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Delete a line item. Returns false when it was already absent.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != product_id);
        let changed = self.items.len() != before;
        if changed { self.touch(); }
        changed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

impl Default for Cart { fn default() -> Self { Self::new() } }

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, quantity: u32) -> LineItem {
        LineItem {
            id: id.into(),
            name: format!("Product {id}"),
            price: Money::from_units(price),
            image: String::new(),
            quantity,
        }
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::new();
        cart.add_one(item("P1", 10_000, 1));
        cart.add_one(item("P1", 10_000, 1));
        cart.add_one(item("P2", 4_000, 1));
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.quantity_of("P1"), 2);
        assert_eq!(cart.subtotal(), Money::from_units(24_000));
    }

    #[test]
    fn test_zero_quantity_removes() {
        let mut cart = Cart::new();
        cart.add_one(item("P1", 10_000, 2));
        assert!(cart.set_quantity("P1", 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_one(item("P1", 10_000, 1));
        assert!(cart.remove("P1"));
        assert!(!cart.remove("P1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_one(item("P2", 1_000, 1));
        cart.add_one(item("P1", 2_000, 1));
        cart.add_one(item("P2", 1_000, 1));
        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["P2", "P1"]);
    }
}
