//! CleanCart Storefront Engine
//!
//! Cart and pricing core for a cleaning-products storefront.
//!
//! ## Features
//! - Cart state management with per-product line items
//! - Fixed-catalog coupon validation and discounts
//! - Shipping-threshold pricing summaries
//! - Key-value persistence with corruption recovery
//! - In-process publish/subscribe for cross-component sync

use thiserror::Error;

pub mod bus;
pub mod catalog;
pub mod domain;
pub mod services;
pub mod storage;

pub use bus::{Subscription, SyncBus};
pub use catalog::{InMemoryCatalog, ProductCatalog};
pub use domain::aggregates::{Cart, LineItem, Product};
pub use domain::events::StorefrontEvent;
pub use domain::pricing::coupon::{AppliedCoupon, Coupon, CouponEngine, DiscountRule};
pub use domain::pricing::{summarize, PricingSummary, FREE_SHIPPING_THRESHOLD, STANDARD_SHIPPING_FEE};
pub use domain::value_objects::{Money, Quantity};
pub use services::{CartStore, WishlistStore};
pub use storage::{KvStore, MemoryBackend, StorageBackend};

// =============================================================================
// Error Types
// =============================================================================

/// Failures surfaced to the calling UI layer. Stock and coupon rejections
/// are ordinary negative results, expected during normal shopping.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Product not found")]
    ProductNotFound,

    #[error("Insufficient stock")]
    InsufficientStock,

    #[error("Invalid coupon code")]
    InvalidCoupon,

    #[error("Coupon minimum purchase not met")]
    CouponIneligible,
}

pub type Result<T> = std::result::Result<T, StoreError>;
