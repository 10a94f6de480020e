//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    1.2 * 2 + 1.0 = 3.4000000000000004  ❌ WRONG!                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    120 * 2 + 100 = 340 cents                                            │
//! │    Totals and KPI sums are exact                                        │
//! │                                                                         │
//! │  Floats only exist at the JSON edge (see [`as_major_units`]).           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::from_cents(120); // 1.20
//! let line_total = price.checked_mul_qty(2).unwrap();
//! assert_eq!(line_total.cents(), 240);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values exist only transiently, so that
///   validation can reject them with a precise message
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **sqlx transparent**: stored as a plain INTEGER column
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  ReceiptLine.unit_price ──► line total (qty × unit) ──► Receipt.total   │
/// │                                                            │            │
/// │  Product.price (first-seen unit price)                     ▼            │
/// │                                                   KPI total_revenue     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount in major units (e.g. `1.2`) to Money.
    ///
    /// Non-negative amounts are rounded to the nearest cent (half away from
    /// zero). Negative amounts are rounded down, so anything below zero stays
    /// below zero and is caught by price validation, even `-0.001`.
    /// Returns `None` for NaN, infinities, and values outside the i64 range.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64(1.2).unwrap().cents(), 120);
    /// assert_eq!(Money::from_major_f64(-1.0).unwrap().cents(), -100);
    /// assert_eq!(Money::from_major_f64(-0.001).unwrap().cents(), -1);
    /// assert!(Money::from_major_f64(f64::NAN).is_none());
    /// ```
    pub fn from_major_f64(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        let scaled = amount * 100.0;
        let cents = if amount < 0.0 {
            scaled.floor()
        } else {
            scaled.round()
        };
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Returns the value as a decimal in major units (for JSON output only).
    #[inline]
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.checked_mul_qty(3).unwrap().cents(), 897);
    /// assert!(Money::from_cents(i64::MAX).checked_mul_qty(2).is_none());
    /// ```
    #[inline]
    pub const fn checked_mul_qty(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as a plain decimal, e.g. `3.40` or `-1.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// JSON Edge
// =============================================================================

/// Serde adapter that exposes [`Money`] as a JSON number in major units.
///
/// ## Usage
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use tally_core::money::{self, Money};
///
/// #[derive(Serialize, Deserialize)]
/// struct Line {
///     #[serde(with = "money::as_major_units")]
///     unit_price: Money,
/// }
///
/// let line: Line = serde_json::from_str(r#"{"unit_price": 1.2}"#).unwrap();
/// assert_eq!(line.unit_price.cents(), 120);
/// assert_eq!(serde_json::to_string(&line).unwrap(), r#"{"unit_price":1.2}"#);
/// ```
pub mod as_major_units {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Money;

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_major_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        Money::from_major_f64(amount)
            .ok_or_else(|| D::Error::custom(format!("amount {amount} is out of range")))
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
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_f64_rounds_to_nearest_cent() {
        assert_eq!(Money::from_major_f64(1.2).map(|m| m.cents()), Some(120));
        assert_eq!(Money::from_major_f64(0.0).map(|m| m.cents()), Some(0));
        // 1.005 is 1.00499999... in binary
        assert_eq!(Money::from_major_f64(1.005).map(|m| m.cents()), Some(100));
        // 0.29 * 100 is 28.999999999999996
        assert_eq!(Money::from_major_f64(0.29).map(|m| m.cents()), Some(29));
        assert_eq!(Money::from_major_f64(-1.0).map(|m| m.cents()), Some(-100));
    }

    #[test]
    fn test_from_major_f64_keeps_sub_cent_negatives_negative() {
        assert_eq!(Money::from_major_f64(-0.001).map(|m| m.cents()), Some(-1));
        assert_eq!(Money::from_major_f64(-0.004).map(|m| m.cents()), Some(-1));
        assert!(Money::from_major_f64(-0.001).unwrap().is_negative());
        // Negative zero is zero
        assert_eq!(Money::from_major_f64(-0.0).map(|m| m.cents()), Some(0));
        assert_eq!(Money::from_major_f64(0.001).map(|m| m.cents()), Some(0));
    }

    #[test]
    fn test_from_major_f64_rejects_unrepresentable() {
        assert!(Money::from_major_f64(f64::NAN).is_none());
        assert!(Money::from_major_f64(f64::INFINITY).is_none());
        assert!(Money::from_major_f64(1e300).is_none());
    }

    #[test]
    fn test_to_major_f64() {
        assert_eq!(Money::from_cents(340).to_major_f64(), 3.4);
        assert_eq!(Money::from_cents(240).to_major_f64(), 2.4);
        assert_eq!(Money::zero().to_major_f64(), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_checked_operations() {
        assert_eq!(
            Money::from_cents(120).checked_mul_qty(2),
            Some(Money::from_cents(240))
        );
        assert!(Money::from_cents(i64::MAX).checked_mul_qty(2).is_none());
        assert!(Money::from_cents(i64::MAX)
            .checked_add(Money::from_cents(1))
            .is_none());
    }

    #[test]
    fn test_json_edge() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            #[serde(with = "as_major_units")]
            amount: Money,
        }

        let parsed: Wrapper = serde_json::from_str(r#"{"amount": 3.4}"#).unwrap();
        assert_eq!(parsed.amount.cents(), 340);

        let integer: Wrapper = serde_json::from_str(r#"{"amount": 2}"#).unwrap();
        assert_eq!(integer.amount.cents(), 200);

        let json = serde_json::to_value(&Wrapper {
            amount: Money::from_cents(340),
        })
        .unwrap();
        assert_eq!(json["amount"], serde_json::json!(3.4));

        assert!(serde_json::from_str::<Wrapper>(r#"{"amount": 1e300}"#).is_err());

        let negative: Wrapper = serde_json::from_str(r#"{"amount": -0.001}"#).unwrap();
        assert!(negative.amount.is_negative());
    }
}
