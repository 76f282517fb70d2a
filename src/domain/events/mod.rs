//! Storefront events
//!
//! Typed payloads carried over the sync bus so independently mounted UI
//! surfaces (header badge, cart page, wishlist page) stay consistent without
//! referencing each other.

use crate::domain::aggregates::{LineItem, Product};

#[derive(Clone, Debug)]
pub enum StorefrontEvent {
    /// The cart changed; payload is the full updated line-item list.
    CartUpdated { items: Vec<LineItem> },
    /// The wishlist changed; payload is the full updated snapshot list.
    WishlistUpdated { entries: Vec<Product> },
}
