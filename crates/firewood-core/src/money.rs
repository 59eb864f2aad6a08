//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    2 × 15.99 + 13.49 = 45.470000000000006  ❌                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    2 × 1599 + 1349 = 4547 cents = $45.47   ✅                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use firewood_core::money::Money;
//!
//! let oak = Money::from_cents(1599); // $15.99
//! let line = oak.multiply_quantity(2);
//! assert_eq!(line.cents(), 3198);
//!
//! // Discounts never push a total below zero
//! let total = Money::from_cents(500).minus_floored(Money::from_cents(1000));
//! assert!(total.is_zero());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: a discount larger than the subtotal is representable
///   before it is floored
/// - **Single field tuple struct**: zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► LineItem.unit_price ──► line total ──► Cart subtotal
///                                                               │
///                                     Promo discount ───────────┤
///                                                               ▼
///                                               total (floored at $0.00)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use firewood_core::money::Money;
    ///
    /// let price = Money::from_cents(1349); // $13.49
    /// assert_eq!(price.cents(), 1349);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole dollars.
    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use firewood_core::money::Money;
    ///
    /// let hickory = Money::from_cents(1825);
    /// assert_eq!(hickory.multiply_quantity(3).cents(), 5475);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Subtracts `other`, never going below zero.
    ///
    /// This is how a flat promo discount is applied to a cart total.
    #[inline]
    pub fn minus_floored(self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }

    /// Formats the amount without a currency symbol, always two decimals.
    ///
    /// Matches what the cart summary and modal display next to their own
    /// `$` prefix.
    ///
    /// ```rust
    /// use firewood_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(4547).to_plain_string(), "45.47");
    /// assert_eq!(Money::from_cents(5).to_plain_string(), "0.05");
    /// ```
    pub fn to_plain_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount with a `$` prefix, e.g. `$45.47`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1599);
        assert_eq!(money.cents(), 1599);
        assert_eq!(money.dollars(), 15);
        assert_eq!(money.cents_part(), 99);
        assert_eq!(Money::from_dollars(10).cents(), 1000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(4547)), "$45.47");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_cents(3547).to_plain_string(), "35.47");
        assert_eq!(Money::zero().to_plain_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1599);
        let b = Money::from_cents(1349);

        assert_eq!((a * 2 + b).cents(), 4547);
        assert_eq!((a - b).cents(), 250);
        let total: Money = vec![a, b].into_iter().sum();
        assert_eq!(total.cents(), 2948);
    }

    #[test]
    fn test_minus_floored_never_negative() {
        let discount = Money::from_dollars(10);
        assert_eq!(Money::from_cents(4547).minus_floored(discount).cents(), 3547);
        assert_eq!(Money::from_cents(999).minus_floored(discount).cents(), 0);
        assert_eq!(Money::zero().minus_floored(discount).cents(), 0);
    }

    /// Float arithmetic on the catalog prices drifts; cents do not.
    #[test]
    fn test_no_float_drift() {
        let total = Money::from_cents(1599) * 2 + Money::from_cents(1349);
        assert_eq!(total.to_plain_string(), "45.47");
    }
}
