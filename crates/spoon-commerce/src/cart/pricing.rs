//! Pricing policy and cart totals.
//!
//! Pricing is a pure function of the line items and the session's policy
//! settings. The storefront historically shipped two rule sets (a flat
//! optional delivery fee, and a session discount plus a single-use
//! coupon), so the policy is a tagged variant chosen when the cart store
//! is built, and the store itself never branches on the rules.

use crate::cart::line_item::LineItem;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Sales tax rate applied to the subtotal.
pub const TAX_RATE: f64 = 0.08;

/// The one accepted coupon code, matched case-insensitively.
pub const COUPON_CODE: &str = "SILVER10";

/// Discount rate granted by [`COUPON_CODE`].
pub const COUPON_RATE: f64 = 0.10;

/// Delivery fee charged by the default policy.
pub const DEFAULT_DELIVERY_FEE: Money = Money::from_rupees(40);

/// Session-scoped policy settings, persisted alongside the line items.
///
/// These survive `clear()`: emptying the cart does not forget the
/// delivery choice or an applied coupon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicySettings {
    /// Whether delivery (and its fee, under the delivery policy) is on.
    pub delivery_enabled: bool,
    /// The coupon code in effect, canonical uppercase. At most one per
    /// session.
    pub applied_coupon: Option<String>,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            delivery_enabled: true,
            applied_coupon: None,
        }
    }
}

/// Whether an adjustment adds to or subtracts from the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjustmentKind {
    /// Added to the total (e.g., delivery fee).
    Fee,
    /// Subtracted from the total (e.g., coupon).
    Discount,
}

/// A labelled modification to the total beyond subtotal and tax.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Adjustment {
    /// Display label (e.g., "Delivery fee", "Coupon SILVER10").
    pub label: String,
    /// Magnitude, always non-negative; `kind` carries the sign.
    pub amount: Money,
    /// Fee or discount.
    pub kind: AdjustmentKind,
}

impl Adjustment {
    /// Create a fee adjustment.
    pub fn fee(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            amount,
            kind: AdjustmentKind::Fee,
        }
    }

    /// Create a discount adjustment.
    pub fn discount(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            amount,
            kind: AdjustmentKind::Discount,
        }
    }

    /// The amount with its sign applied.
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            AdjustmentKind::Fee => self.amount,
            AdjustmentKind::Discount => -self.amount,
        }
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CartTotals {
    /// Sum of all line totals.
    pub subtotal: Money,
    /// `subtotal * TAX_RATE`.
    pub tax: Money,
    /// Policy adjustments in application order.
    pub adjustments: Vec<Adjustment>,
    /// Final total, never negative.
    pub total: Money,
}

impl CartTotals {
    /// Total amount discounted.
    pub fn savings(&self) -> Money {
        Money::sum(
            self.adjustments
                .iter()
                .filter(|a| a.kind == AdjustmentKind::Discount)
                .map(|a| &a.amount),
        )
    }

    /// Check if any discounts are applied.
    pub fn has_discounts(&self) -> bool {
        self.savings().is_positive()
    }
}

/// Pricing rules, selected at cart-store construction.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingPolicy {
    /// Subtotal plus tax, nothing else.
    NoAdjustment,
    /// Flat fee added while delivery is enabled. No discounts.
    DeliveryFee {
        /// The fee charged.
        fee: Money,
    },
    /// Session-wide discount plus the single-use coupon. No delivery fee.
    DiscountAndCoupon {
        /// Fraction of the subtotal discounted every session (e.g. 0.05).
        /// An explicit configuration value; the store never picks one at
        /// random.
        special_rate: f64,
    },
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy::DeliveryFee {
            fee: DEFAULT_DELIVERY_FEE,
        }
    }
}

impl PricingPolicy {
    /// The delivery-fee policy with the standard ₹40 fee.
    pub fn delivery_fee() -> Self {
        Self::default()
    }

    /// The discount-and-coupon policy with the given session rate.
    pub fn discount_and_coupon(special_rate: f64) -> Self {
        PricingPolicy::DiscountAndCoupon { special_rate }
    }

    /// Whether this policy honors coupon codes.
    pub fn accepts_coupons(&self) -> bool {
        matches!(self, PricingPolicy::DiscountAndCoupon { .. })
    }

    /// Compute the pricing breakdown for the given cart contents.
    ///
    /// Pure: same inputs, same totals. The final total is clamped at
    /// zero if discounts would exceed subtotal plus tax.
    pub fn compute(&self, items: &[LineItem], settings: &PolicySettings) -> CartTotals {
        let subtotal = Money::sum(items.iter().map(|i| &i.line_total));
        let tax = subtotal.multiply_decimal(TAX_RATE);

        let mut adjustments = Vec::new();
        match self {
            PricingPolicy::NoAdjustment => {}
            PricingPolicy::DeliveryFee { fee } => {
                if settings.delivery_enabled && fee.is_positive() {
                    adjustments.push(Adjustment::fee("Delivery fee", *fee));
                }
            }
            PricingPolicy::DiscountAndCoupon { special_rate } => {
                let special = subtotal.multiply_decimal(*special_rate);
                if special.is_positive() {
                    adjustments.push(Adjustment::discount("Special discount", special));
                }
                if let Some(code) = &settings.applied_coupon {
                    let coupon = subtotal.multiply_decimal(COUPON_RATE);
                    if coupon.is_positive() {
                        adjustments.push(Adjustment::discount(format!("Coupon {}", code), coupon));
                    }
                }
            }
        }

        let mut total = subtotal + tax;
        for adjustment in &adjustments {
            total = total + adjustment.signed_amount();
        }
        if total.is_negative() {
            total = Money::zero();
        }

        CartTotals {
            subtotal,
            tax,
            adjustments,
            total,
        }
    }
}
