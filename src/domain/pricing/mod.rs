//! Pricing calculator
//!
//! Pure combination of line-item subtotal, the shipping-threshold rule, and
//! an optionally applied coupon into a payable total. Called on every UI
//! refresh, so it stays cheap, deterministic, and side-effect free.

pub mod coupon;

use serde::Serialize;

use crate::domain::aggregates::Cart;
use crate::domain::value_objects::Money;
use self::coupon::AppliedCoupon;

/// Subtotal at or above this ships for free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::const_units(50_000);
/// Flat fee charged below the free-shipping threshold.
pub const STANDARD_SHIPPING_FEE: Money = Money::const_units(5_000);

/// Derived totals for display. Never stored; always recomputed from the
/// current cart and applied coupon.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PricingSummary {
    pub subtotal: Money,
    pub shipping_cost: Money,
    pub discount_amount: Money,
    pub total: Money,
}

/// Compute the payable total for a cart and an optionally applied coupon.
///
/// The discount is re-derived from the coupon rule against the live subtotal
/// rather than read from the application-time snapshot, so it can never
/// exceed the subtotal even after items are removed. Free-shipping coupons
/// act through the shipping term only; they contribute no separate discount.
pub fn summarize(cart: &Cart, applied: Option<&AppliedCoupon>) -> PricingSummary {
    let subtotal = cart.subtotal();

    let coupon_waives_shipping = applied.is_some_and(|a| a.coupon.waives_shipping());
    let shipping_cost = if subtotal >= FREE_SHIPPING_THRESHOLD || coupon_waives_shipping {
        Money::zero()
    } else {
        STANDARD_SHIPPING_FEE
    };

    let discount_amount = applied
        .filter(|a| !a.coupon.waives_shipping())
        .map_or(Money::zero(), |a| a.coupon.discount_for(subtotal));

    let total = (subtotal + shipping_cost).saturating_sub(&discount_amount);

    PricingSummary { subtotal, shipping_cost, discount_amount, total }
}
