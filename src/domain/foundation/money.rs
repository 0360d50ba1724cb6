//! Money value object.
//!
//! All monetary values are stored as signed 64-bit minor units (kuruş for
//! TRY, cents for USD), never floats. The currency code itself travels
//! alongside on the owning entity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Monetary amount in minor units of the owning entity's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates an amount from minor units.
    pub fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates an amount from major units (e.g. whole lira).
    pub fn from_major(major: i64) -> Self {
        Self(major * 100)
    }

    /// Returns the amount in minor units.
    pub fn minor(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns true if the amount is greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Scales the amount by a 0-100 percentage, truncating fractions of a
    /// minor unit.
    pub fn percentage(&self, pct: u8) -> Self {
        Self(self.0 * i64::from(pct) / 100)
    }

    /// Subtraction clamped at zero.
    pub fn saturating_sub(&self, other: Money) -> Self {
        Self((self.0 - other.0).max(0))
    }

    /// The smaller of two amounts.
    pub fn min(self, other: Money) -> Self {
        Self(self.0.min(other.0))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0 * i64::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_major_scales_to_minor_units() {
        assert_eq!(Money::from_major(10).minor(), 1000);
    }

    #[test]
    fn percentage_scales_correctly() {
        assert_eq!(Money::from_major(1000).percentage(70), Money::from_major(700));
    }

    #[test]
    fn percentage_truncates_fractional_minor_units() {
        assert_eq!(Money::from_minor(99).percentage(50), Money::from_minor(49));
    }

    #[test]
    fn sum_adds_all_amounts() {
        let total: Money = [Money::from_major(1), Money::from_major(2), Money::from_minor(50)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_minor(350));
    }

    #[test]
    fn saturating_sub_clamps_at_zero() {
        assert_eq!(
            Money::from_major(1).saturating_sub(Money::from_major(2)),
            Money::ZERO
        );
    }

    #[test]
    fn multiply_by_quantity() {
        assert_eq!(Money::from_minor(250) * 4, Money::from_major(10));
    }

    #[test]
    fn display_formats_major_and_minor() {
        assert_eq!(Money::from_minor(123456).to_string(), "1234.56");
        assert_eq!(Money::from_minor(-5).to_string(), "-0.05");
    }

    #[test]
    fn serializes_as_plain_integer() {
        assert_eq!(serde_json::to_string(&Money::from_minor(150)).unwrap(), "150");
    }

    #[test]
    fn ordering_follows_amount() {
        assert!(Money::from_minor(1) < Money::from_minor(2));
        assert!(Money::ZERO.is_zero());
        assert!(Money::from_minor(-1).is_negative());
    }
}
