//! Coupon catalog and engine
//!
//! Coupons come from a fixed catalog; they are not editable at runtime. At
//! most one coupon is applied at a time: applying a new code replaces the
//! previous one, it never stacks.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::pricing::STANDARD_SHIPPING_FEE;
use crate::domain::value_objects::Money;
use crate::{Result, StoreError};

/// How a coupon discounts the cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DiscountRule {
    /// Percentage points off the cart total.
    Percentage(Decimal),
    /// Flat currency amount off the cart total.
    FixedAmount(Money),
    /// The standard shipping fee is waived.
    FreeShipping,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub rule: DiscountRule,
    pub minimum_cart_total: Money,
}

impl Coupon {
    pub fn new(code: impl Into<String>, rule: DiscountRule, minimum_cart_total: Money) -> Self {
        Self { code: code.into(), rule, minimum_cart_total }
    }

    /// Discount this coupon yields against a cart total, clamped so the
    /// payable subtotal never goes negative.
    pub fn discount_for(&self, cart_total: Money) -> Money {
        let raw = match &self.rule {
            DiscountRule::Percentage(points) => cart_total.percent(*points),
            DiscountRule::FixedAmount(amount) => *amount,
            DiscountRule::FreeShipping => STANDARD_SHIPPING_FEE,
        };
        raw.min(cart_total)
    }

    pub fn waives_shipping(&self) -> bool {
        matches!(self.rule, DiscountRule::FreeShipping)
    }
}

/// A coupon applied to the cart, with the discount computed against the cart
/// total in effect at application time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedCoupon {
    pub coupon: Coupon,
    pub discount_amount: Money,
}

/// Validates codes against the fixed catalog and tracks the single applied
/// coupon.
#[derive(Debug)]
pub struct CouponEngine {
    catalog: Vec<Coupon>,
    applied: Option<AppliedCoupon>,
}

impl CouponEngine {
    pub fn new() -> Self {
        Self { catalog: builtin_coupons(), applied: None }
    }

    pub fn applied(&self) -> Option<&AppliedCoupon> { self.applied.as_ref() }

    /// Apply a coupon code against the current cart total. Replaces any
    /// previously applied coupon on success; on failure the previous coupon
    /// stays in effect.
    pub fn apply(&mut self, code: &str, cart_total: Money) -> Result<AppliedCoupon> {
        let normalized = code.trim().to_uppercase();
        let coupon = self
            .catalog
            .iter()
            .find(|c| c.code == normalized)
            .ok_or(StoreError::InvalidCoupon)?;
        if cart_total < coupon.minimum_cart_total {
            return Err(StoreError::CouponIneligible);
        }
        let applied = AppliedCoupon {
            coupon: coupon.clone(),
            discount_amount: coupon.discount_for(cart_total),
        };
        self.applied = Some(applied.clone());
        Ok(applied)
    }

    /// Clear the applied coupon; pricing reverts to full subtotal/shipping.
    pub fn remove(&mut self) { self.applied = None; }
}

impl Default for CouponEngine { fn default() -> Self { Self::new() } }

/// The fixed coupon catalog.
fn builtin_coupons() -> Vec<Coupon> {
    vec![
        Coupon::new(
            "WELCOME10",
            DiscountRule::Percentage(Decimal::from(10)),
            Money::from_units(10_000),
        ),
        Coupon::new(
            "SAVE5000",
            DiscountRule::FixedAmount(Money::from_units(5_000)),
            Money::from_units(25_000),
        ),
        Coupon::new(
            "CLEAN20",
            DiscountRule::Percentage(Decimal::from(20)),
            Money::from_units(50_000),
        ),
        Coupon::new("FREESHIP", DiscountRule::FreeShipping, Money::zero()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_code_is_invalid() {
        let mut engine = CouponEngine::new();
        let err = engine.apply("NOPE", Money::from_units(100_000)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidCoupon));
        assert!(engine.applied().is_none());
    }

    #[test]
    fn test_minimum_cart_total_enforced() {
        let mut engine = CouponEngine::new();
        // SAVE5000 requires a 25_000 cart; 15_000 is not enough.
        let err = engine.apply("SAVE5000", Money::from_units(15_000)).unwrap_err();
        assert!(matches!(err, StoreError::CouponIneligible));
    }

    #[test]
    fn test_code_normalization() {
        let mut engine = CouponEngine::new();
        let applied = engine.apply("  freeship ", Money::from_units(10_000)).unwrap();
        assert_eq!(applied.coupon.code, "FREESHIP");
    }

    #[test]
    fn test_apply_replaces_never_stacks() {
        let mut engine = CouponEngine::new();
        engine.apply("WELCOME10", Money::from_units(30_000)).unwrap();
        engine.apply("SAVE5000", Money::from_units(30_000)).unwrap();
        let applied = engine.applied().unwrap();
        assert_eq!(applied.coupon.code, "SAVE5000");
        assert_eq!(applied.discount_amount, Money::from_units(5_000));
    }

    #[test]
    fn test_failed_apply_keeps_previous_coupon() {
        let mut engine = CouponEngine::new();
        engine.apply("WELCOME10", Money::from_units(30_000)).unwrap();
        engine.apply("SAVE5000", Money::from_units(10_000)).unwrap_err();
        assert_eq!(engine.applied().unwrap().coupon.code, "WELCOME10");
    }

    #[test]
    fn test_discount_clamped_to_cart_total() {
        let coupon = Coupon::new(
            "BIG",
            DiscountRule::FixedAmount(Money::from_units(50_000)),
            Money::zero(),
        );
        assert_eq!(coupon.discount_for(Money::from_units(8_000)), Money::from_units(8_000));
    }

    #[test]
    fn test_percentage_discount() {
        let mut engine = CouponEngine::new();
        let applied = engine.apply("WELCOME10", Money::from_units(40_000)).unwrap();
        assert_eq!(applied.discount_amount, Money::from_units(4_000));
    }

    #[test]
    fn test_remove_clears_applied() {
        let mut engine = CouponEngine::new();
        engine.apply("FREESHIP", Money::from_units(10_000)).unwrap();
        engine.remove();
        assert!(engine.applied().is_none());
    }
}
