use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// Monetary amount value object.
///
/// Costs and prices are never negative in a proposal, so the constructor
/// rejects negative amounts. All arithmetic stays at full decimal
/// precision; rounding to cents happens only through [`Money::round_to_cents`]
/// at the category-total boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a new monetary amount
    ///
    /// # Errors
    /// Returns `ValidationError::MustBeNonNegative` for negative amounts
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::MustBeNonNegative(value.to_string()));
        }
        Ok(Money(value))
    }

    /// Zero dollars
    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Get the raw decimal value
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Round to 2 fractional digits using round-half-to-even.
    ///
    /// Half-up rounding over many line items drifts the aggregate upward;
    /// half-to-even keeps the drift statistically unbiased across a proposal.
    pub fn round_to_cents(&self) -> Self {
        Money(round_half_even(self.0))
    }

    /// Multiply by a non-negative factor (a rate or a quantity)
    ///
    /// # Errors
    /// Returns `ValidationError::MustBeNonNegative` for negative factors
    pub fn multiply(&self, factor: Decimal) -> Result<Self, ValidationError> {
        if factor.is_sign_negative() && !factor.is_zero() {
            return Err(ValidationError::MustBeNonNegative(factor.to_string()));
        }
        Ok(Money(self.0 * factor))
    }
}

/// Round an arbitrary-precision decimal to cents with banker's rounding.
pub fn round_half_even(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        // Safe: sum of non-negative amounts is non-negative
        Money(self.0 + other.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_new_valid() {
        let money = Money::new(dec!(100.50));
        assert!(money.is_ok());
        assert_eq!(money.unwrap().value(), dec!(100.50));
    }

    #[test]
    fn test_money_new_negative() {
        let money = Money::new(dec!(-10));
        assert!(money.is_err());
    }

    #[test]
    fn test_money_new_zero() {
        let money = Money::new(Decimal::ZERO).unwrap();
        assert!(money.is_zero());
    }

    #[test]
    fn test_round_half_even_ties_go_to_even_digit() {
        // Distinguishes banker's rounding from round-half-up
        assert_eq!(round_half_even(dec!(0.125)), dec!(0.12));
        assert_eq!(round_half_even(dec!(0.135)), dec!(0.14));
    }

    #[test]
    fn test_round_half_even_non_ties() {
        assert_eq!(round_half_even(dec!(1.234)), dec!(1.23));
        assert_eq!(round_half_even(dec!(1.236)), dec!(1.24));
    }

    #[test]
    fn test_round_to_cents_idempotent() {
        let money = Money::new(dec!(13333.33)).unwrap();
        assert_eq!(money.round_to_cents(), money);
    }

    #[test]
    fn test_money_add() {
        let a = Money::new(dec!(50.25)).unwrap();
        let b = Money::new(dec!(25.75)).unwrap();
        assert_eq!((a + b).value(), dec!(76.00));
    }

    #[test]
    fn test_money_sum() {
        let total: Money = vec![
            Money::new(dec!(1.10)).unwrap(),
            Money::new(dec!(2.20)).unwrap(),
            Money::new(dec!(3.30)).unwrap(),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.value(), dec!(6.60));
    }

    #[test]
    fn test_money_multiply() {
        let money = Money::new(dec!(10)).unwrap();
        assert_eq!(money.multiply(dec!(2.5)).unwrap().value(), dec!(25));
    }

    #[test]
    fn test_money_multiply_negative_factor() {
        let money = Money::new(dec!(10)).unwrap();
        assert!(money.multiply(dec!(-2)).is_err());
    }

    #[test]
    fn test_money_display() {
        let money = Money::new(dec!(13333.33)).unwrap();
        assert_eq!(format!("{}", money), "$13333.33");
    }
}
