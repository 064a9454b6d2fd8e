use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// Desired profit margin as a fraction of the sell price.
///
/// The business quotes margin as "percentage of sell price that is
/// profit", so the sell price comes from the divisor model
/// `sell = cost / (1 - margin)` rather than a markup multiplier. That
/// form is the only one satisfying `margin = (sell - cost) / sell`
/// exactly.
///
/// Valid range is `[0, 1)`: at `margin = 1` the divisor is undefined,
/// and a negative margin means the proposal sells below cost. Both are
/// budgeting mistakes the constructor rejects rather than clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Margin(Decimal);

impl Margin {
    /// Create a margin fraction
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidMargin` when outside `[0, 1)`
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value < Decimal::ZERO || value >= Decimal::ONE {
            return Err(ValidationError::InvalidMargin(value.to_string()));
        }
        Ok(Margin(value))
    }

    /// Zero margin (sell price equals cost)
    pub fn zero() -> Self {
        Margin(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The divisor `1 - margin` applied to cost to obtain sell price.
    ///
    /// Strictly positive for every valid margin.
    pub fn complement(&self) -> Decimal {
        Decimal::ONE - self.0
    }
}

impl std::fmt::Display for Margin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0 * Decimal::ONE_HUNDRED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_margin_new_valid() {
        let margin = Margin::new(dec!(0.25)).unwrap();
        assert_eq!(margin.value(), dec!(0.25));
    }

    #[test]
    fn test_margin_zero_is_valid() {
        assert!(Margin::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_margin_one_rejected() {
        // Divisor would be zero
        assert!(Margin::new(Decimal::ONE).is_err());
    }

    #[test]
    fn test_margin_above_one_rejected() {
        assert!(Margin::new(dec!(1.5)).is_err());
    }

    #[test]
    fn test_margin_negative_rejected() {
        assert!(Margin::new(dec!(-0.01)).is_err());
    }

    #[test]
    fn test_margin_complement() {
        let margin = Margin::new(dec!(0.25)).unwrap();
        assert_eq!(margin.complement(), dec!(0.75));
    }

    #[test]
    fn test_margin_display() {
        let margin = Margin::new(dec!(0.25)).unwrap();
        assert_eq!(format!("{}", margin), "25.00%");
    }
}
