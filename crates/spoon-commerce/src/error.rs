//! Cart error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
///
/// Benign conditions (removing an unknown line, rejecting a coupon) are
/// reported through boolean returns, not errors; storage failures are
/// contained inside the persistence adapter and never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Quantity outside the allowed `[1, 99]` range.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Arithmetic overflow in a price calculation.
    #[error("Arithmetic overflow in price calculation")]
    Overflow,
}
