//! Stateful stores wiring the domain to storage and the sync bus.
pub mod cart;
pub mod wishlist;

pub use cart::CartStore;
pub use wishlist::WishlistStore;
