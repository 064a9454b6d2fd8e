use rust_decimal::Decimal;

use crate::domain::entities::cost_breakdown::{CostBreakdown, CostCategory};
use crate::domain::errors::ValidationError;
use crate::domain::value_objects::Margin;

/// Converts costs to client sell prices with the divisor model:
/// `sell = cost / (1 - margin)`.
///
/// Margin is profit as a fraction of sell price, so the divisor form is
/// exact: `(sell - cost) / sell == margin` for every cost. A markup
/// multiplier (`cost * (1 + m)`) would understate the quoted margin and
/// is deliberately not offered.
///
/// Projection happens at full precision. Nothing here rounds; the audit
/// aggregation rounds the summed category totals through the ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceProjector;

impl PriceProjector {
    pub fn new() -> Self {
        Self
    }

    /// Project a cost to its sell price at the given margin.
    pub fn project(&self, cost: Decimal, margin: Margin) -> Decimal {
        // complement() is strictly positive for every valid Margin
        cost / margin.complement()
    }

    /// Project with an unvalidated margin fraction.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidMargin` when the fraction is
    /// outside `[0, 1)`; the value is rejected, never clamped, because a
    /// clamp would mask a budgeting mistake.
    pub fn project_fraction(
        &self,
        cost: Decimal,
        margin_fraction: Decimal,
    ) -> Result<Decimal, ValidationError> {
        let margin = Margin::new(margin_fraction)?;
        Ok(self.project(cost, margin))
    }

    /// Margin dollars earned at the given margin.
    pub fn margin_dollars(&self, cost: Decimal, margin: Margin) -> Decimal {
        self.project(cost, margin) - cost
    }

    /// Project each direct category of a breakdown to its sell price.
    ///
    /// The per-category sells sum to the screen's sell price exactly
    /// (projection is linear), so summing these and projecting the
    /// total are interchangeable; line-item exports use this form.
    pub fn project_categories(
        &self,
        breakdown: &CostBreakdown,
        margin: Margin,
    ) -> Vec<(CostCategory, Decimal)> {
        breakdown
            .direct_categories()
            .iter()
            .map(|(category, cost)| (*category, self.project(*cost, margin)))
            .collect()
    }
}
