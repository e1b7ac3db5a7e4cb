//! # Money Module
//!
//! Provides the `Money` type for monetary values.
//!
//! ## Why a Double, Not Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NUMERIC CONTRACT                                                       │
//! │                                                                         │
//! │  Every bill ever persisted by this system stores amounts as IEEE        │
//! │  doubles (2.99, 8.97, 9.867...). Totals, tax, discounts, and change     │
//! │  are computed from UNROUNDED intermediate values; only display          │
//! │  formatting rounds, and only to two decimals.                           │
//! │                                                                         │
//! │  Switching to integer cents would change the stored values and the     │
//! │  computed change on existing data. The double semantics are the        │
//! │  contract; the newtype exists so no call site ever rounds mid-         │
//! │  computation by accident.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fastbills_core::money::Money;
//!
//! let price = Money::new(2.99);
//! let line = price.multiply_quantity(3);
//! assert!((line.amount() - 8.97).abs() < 1e-9);
//!
//! // Rounding happens at presentation time only
//! assert_eq!(line.to_string(), "$8.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount with IEEE double precision semantics.
///
/// ## Design Decisions
/// - **f64 inner value**: matches the stored representation of every
///   persisted bill; refunds are expressed as negated amounts
/// - **Single field tuple struct**: zero-cost abstraction over f64
/// - **`#[serde(transparent)]`**: serializes as a bare JSON number, so
///   snapshots stay byte-compatible with previously persisted data
///
/// `Money` is not `Eq`/`Ord`/`Hash`; amounts compare with `PartialOrd`
/// like the doubles they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(f64);

impl Money {
    /// Creates a money value from a major-unit amount (e.g. 2.99 dollars).
    #[inline]
    pub const fn new(amount: f64) -> Self {
        Money(amount)
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0.0)
    }

    /// Returns the unrounded inner amount.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Checks if the value is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Checks if the value is negative (refund amounts are negative).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies the amount by an item quantity.
    ///
    /// ## Example
    /// ```rust
    /// use fastbills_core::money::Money;
    ///
    /// let unit_price = Money::new(1.49);
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert!((line_total.amount() - 2.98).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, quantity: i64) -> Self {
        Money(self.0 * quantity as f64)
    }

    /// Applies a fractional rate, e.g. `subtotal.apply_rate(TAX_RATE)`.
    ///
    /// The result is unrounded; compounding rounding error across
    /// tax/discount/change is exactly what this type is here to prevent.
    #[inline]
    pub fn apply_rate(&self, rate: f64) -> Self {
        Money(self.0 * rate)
    }

    /// The amount rounded to two decimals, for callers that need a plain
    /// number at a presentation boundary (receipt rendering, summaries).
    #[inline]
    pub fn rounded(&self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `$X.YY` with two decimals. Presentation-only rounding;
/// the inner amount is untouched.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0.0 { "-" } else { "" };
        write!(f, "{}${:.2}", sign, self.0.abs())
    }
}

impl From<f64> for Money {
    #[inline]
    fn from(amount: f64) -> Self {
        Money(amount)
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Negation, used when a refund bill mirrors the refunded amounts.
impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
