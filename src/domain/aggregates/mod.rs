//! Aggregates module
pub mod cart;
pub mod product;

pub use cart::{Cart, LineItem};
pub use product::Product;
