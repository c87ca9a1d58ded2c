//! Money type for representing monetary values.
//!
//! Uses paise-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. All amounts are
//! Indian rupees; the storefront is single-currency.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A monetary value in Indian rupees.
///
/// Amounts are stored in paise (1/100 rupee).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money {
    /// Amount in paise.
    pub paise: i64,
}

impl Money {
    /// Create a new Money value from paise.
    pub const fn new(paise: i64) -> Self {
        Self { paise }
    }

    /// Create a Money value from whole rupees.
    ///
    /// ```
    /// use spoon_commerce::money::Money;
    /// let price = Money::from_rupees(299);
    /// assert_eq!(price.paise, 29900);
    /// ```
    pub const fn from_rupees(rupees: i64) -> Self {
        Self {
            paise: rupees * 100,
        }
    }

    /// Zero rupees.
    pub const fn zero() -> Self {
        Self { paise: 0 }
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.paise == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.paise > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.paise < 0
    }

    /// Convert to a decimal rupee value.
    pub fn to_rupees(&self) -> f64 {
        self.paise as f64 / 100.0
    }

    /// Try to add another amount, returning `None` on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.paise.checked_add(other.paise).map(Money::new)
    }

    /// Try to multiply by a scalar, returning `None` on overflow.
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.paise.checked_mul(factor).map(Money::new)
    }

    /// Multiply by a decimal factor (e.g., a tax or discount rate).
    ///
    /// The result is rounded to the nearest paisa.
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        Money::new((self.paise as f64 * factor).round() as i64)
    }

    /// Sum an iterator of Money values.
    pub fn sum<'a>(iter: impl Iterator<Item = &'a Money>) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }

    /// Format as a display string (e.g., "₹49.99").
    pub fn display(&self) -> String {
        format!("₹{:.2}", self.to_rupees())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.paise + other.paise)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.paise - other.paise)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        Money::new(self.paise * factor)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money::new(-self.paise)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
