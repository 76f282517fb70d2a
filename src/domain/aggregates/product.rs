//! Product Aggregate
//!
//! The read-only product shape consumed from the catalog. The cart does not
//! own product lifecycle; it only validates existence and stock on add.

use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{Money, Quantity};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub stock: Quantity,
    pub images: Vec<String>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock: Quantity::new(stock),
            images: vec![],
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    pub fn is_in_stock(&self) -> bool { !self.stock.is_zero() }

    /// Display reference for cart line items; empty when no image exists.
    pub fn primary_image(&self) -> String {
        self.images.first().cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_and_image() {
        let p = Product::new("P1", "Dish Soap", Money::from_units(4_500), 12)
            .with_image("/img/dish-soap.webp");
        assert!(p.is_in_stock());
        assert_eq!(p.primary_image(), "/img/dish-soap.webp");

        let empty = Product::new("P2", "Sold Out", Money::from_units(1_000), 0);
        assert!(!empty.is_in_stock());
        assert_eq!(empty.primary_image(), "");
    }
}
