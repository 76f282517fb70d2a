//! Product catalog
//!
//! Read-only collaborator queried by id when adding to the cart. Any
//! transport satisfying the shape works; the in-memory catalog backs tests
//! and the server stub.

use std::collections::HashMap;

use crate::domain::aggregates::Product;
use crate::domain::value_objects::Money;

pub trait ProductCatalog: Send + Sync {
    fn find_by_id(&self, id: &str) -> Option<Product>;
}

#[derive(Default)]
pub struct InMemoryCatalog {
    products: HashMap<String, Product>,
}

impl InMemoryCatalog {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    pub fn all(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.products.values().cloned().collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        products
    }

    /// Demo catalog for the server stub and local development.
    pub fn with_demo_products() -> Self {
        let mut catalog = Self::new();
        for product in [
            Product::new("CLN-001", "All-Purpose Cleaner 750ml", Money::from_units(15_000), 5)
                .with_image("/img/all-purpose-cleaner.webp"),
            Product::new("CLN-002", "Dish Soap 500ml", Money::from_units(4_500), 40)
                .with_image("/img/dish-soap.webp"),
            Product::new("CLN-003", "Laundry Detergent 2L", Money::from_units(22_000), 18)
                .with_image("/img/laundry-detergent.webp"),
            Product::new("CLN-004", "Glass Cleaner 500ml", Money::from_units(8_000), 25)
                .with_image("/img/glass-cleaner.webp"),
            Product::new("CLN-005", "Microfiber Cloth 5-Pack", Money::from_units(12_000), 60)
                .with_image("/img/microfiber-cloths.webp"),
            Product::new("CLN-006", "Heavy-Duty Degreaser 1L", Money::from_units(30_000), 0)
                .with_image("/img/degreaser.webp"),
        ] {
            catalog.insert(product);
        }
        catalog
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn find_by_id(&self, id: &str) -> Option<Product> {
        self.products.get(id).cloned()
    }
}
