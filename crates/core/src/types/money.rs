//! Monetary amounts using decimal arithmetic.
//!
//! All prices on the menu, in the cart, and on orders are US dollar amounts.
//! Amounts keep full decimal precision through arithmetic (tax at 8% of a
//! subtotal is not rounded) and are only rounded to cents for display.
//! Arithmetic saturates at the decimal range instead of panicking.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub};
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A US dollar amount.
///
/// Serialized as a decimal string (e.g. `"12.99"`) so no precision is lost
/// on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Highest price a menu item may carry: $100,000.00.
    pub const MAX_PRICE: Self = Self(Decimal::from_parts(10_000_000, 0, 0, false, 2));

    /// Create an amount from a decimal number of dollars.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create an amount from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by an item quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Multiply by a rate such as a tax rate. The result is not rounded.
    #[must_use]
    pub fn scale(self, rate: Decimal) -> Self {
        Self(self.0.saturating_mul(rate))
    }

    /// Round to whole cents, halves away from zero.
    #[must_use]
    pub fn rounded(self) -> Self {
        let mut cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(2);
        Self(cents)
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns `true` if the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.rounded().0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
        Decimal::from_str(digits).map(Self)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        assert_eq!(Money::from_cents(1299).amount(), Decimal::new(1299, 2));
    }

    #[test]
    fn test_times_quantity() {
        assert_eq!(Money::from_cents(1599).times(2), Money::from_cents(3198));
        assert_eq!(Money::from_cents(1599).times(0), Money::ZERO);
    }

    #[test]
    fn test_scale_keeps_precision() {
        let tax = Money::from_cents(2198).scale(Decimal::new(8, 2));
        assert_eq!(tax.amount(), Decimal::new(17584, 4));
    }

    #[test]
    fn test_rounded_half_away_from_zero() {
        assert_eq!(
            Money::new(Decimal::new(1_7585, 4)).rounded(),
            Money::from_cents(176)
        );
        assert_eq!(
            Money::new(Decimal::new(1_7584, 4)).rounded(),
            Money::from_cents(176)
        );
        assert_eq!(
            Money::new(Decimal::new(1_7549, 4)).rounded(),
            Money::from_cents(175)
        );
    }

    #[test]
    fn test_display_always_two_places() {
        assert_eq!(Money::from_cents(1299).to_string(), "$12.99");
        assert_eq!(Money::new(Decimal::from(3)).to_string(), "$3.00");
        assert_eq!(Money::new(Decimal::new(299, 2)).to_string(), "$2.99");
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge: Money = "50000000000000000000000000000".parse().unwrap();
        assert_eq!(huge.times(2).amount(), Decimal::MAX);
        assert_eq!((huge + huge).amount(), Decimal::MAX);
        assert_eq!([huge, huge, huge].iter().sum::<Money>().amount(), Decimal::MAX);
        assert_eq!((Money::new(Decimal::MIN) - huge).amount(), Decimal::MIN);
        assert!(huge.times(2).to_string().starts_with('$'));
    }

    #[test]
    fn test_max_price() {
        assert_eq!(Money::MAX_PRICE, Money::from_cents(10_000_000));
        assert_eq!(Money::MAX_PRICE.to_string(), "$100000.00");
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_cents(1299), Money::from_cents(899)]
            .iter()
            .sum();
        assert_eq!(total, Money::from_cents(2198));
    }

    #[test]
    fn test_parse_with_and_without_symbol() {
        assert_eq!("12.99".parse::<Money>().unwrap(), Money::from_cents(1299));
        assert_eq!("$8.99".parse::<Money>().unwrap(), Money::from_cents(899));
        assert!("twelve".parse::<Money>().is_err());
    }

    #[test]
    fn test_is_negative() {
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::ZERO.is_negative());
        assert!(!Money::from_cents(1).is_negative());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Money::from_cents(1299)).unwrap();
        assert_eq!(json, "\"12.99\"");
        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Money::from_cents(1299));
    }
}
