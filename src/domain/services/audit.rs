//! Proposal audit aggregation: per-screen breakdowns summed into
//! project totals, rounded only at the five canonical stages, split
//! into the cost-bearing internal audit and the sanitized client
//! summary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::RateConfig;
use crate::domain::entities::cost_breakdown::{CostBreakdown, CostCategory};
use crate::domain::entities::proposal::Proposal;
use crate::domain::errors::PricingError;
use crate::domain::services::costing::ScreenCostEstimator;
use crate::domain::services::price_projector::PriceProjector;
use crate::domain::services::rounding_ledger::{
    RoundingAuditSummary, RoundingLedger, RoundingStage,
};
use crate::domain::services::sanitizer::sanitize_for_client;
use crate::domain::value_objects::{Margin, Money};

/// One screen's priced audit row. Cost-bearing, internal only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenAudit {
    pub name: String,
    pub breakdown: CostBreakdown,
    pub direct_cost: Money,
    /// Full-precision sell; per-screen amounts are not category totals
    /// and therefore never rounded
    pub sell_price: Money,
    pub desired_margin: Margin,
}

/// Full cost/margin-bearing view of a priced proposal, for staff only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalAudit {
    pub proposal_name: String,
    pub customer: Option<String>,
    pub screens: Vec<ScreenAudit>,
    /// Category-by-category sums of the per-screen breakdowns
    pub combined_breakdown: CostBreakdown,
    pub total_cost: Money,
    /// Rounded at stage "Subtotal"
    pub sell_subtotal: Money,
    /// Rounded at stage "Bond"
    pub bond: Money,
    /// Rounded at stage "B&O"
    pub business_occupancy_tax: Money,
    /// Rounded at stage "Sales Tax"
    pub sales_tax: Money,
    /// Rounded at stage "Final Total"
    pub final_client_total: Money,
    pub rounding: RoundingAuditSummary,
    pub generated_at: DateTime<Utc>,
}

/// Client-facing totals and line items, before sanitization.
///
/// Only price-shaped fields belong here; the sanitizer pass over the
/// serialized form is defense in depth, not the mechanism keeping
/// costs out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ClientSummaryDraft {
    proposal_name: String,
    customer: Option<String>,
    screens: Vec<ClientScreenLine>,
    line_items: Vec<ClientLineItem>,
    subtotal: Money,
    bond: Money,
    business_occupancy_tax: Money,
    sales_tax: Money,
    final_total: Money,
    generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ClientScreenLine {
    name: String,
    quantity: u32,
    width_ft: Decimal,
    height_ft: Decimal,
    pitch_mm: Decimal,
    /// Display-rounded; not a category total, so not ledger-logged
    sell_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ClientLineItem {
    category: String,
    price: Money,
}

/// The computed audit artifact: owning internal view plus the derived,
/// one-way sanitized client view. Regenerated whole whenever inputs
/// change; never incrementally updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalAudit {
    pub internal: InternalAudit,
    pub client_summary: Value,
}

/// Prices a proposal and produces its audit.
///
/// Owns a fresh [`RoundingLedger`] per run, so concurrent audits keep
/// independent operation logs.
pub struct ProposalAuditor {
    estimator: ScreenCostEstimator,
    projector: PriceProjector,
    rates: RateConfig,
}

impl ProposalAuditor {
    /// Create an auditor over a validated rate table.
    ///
    /// # Errors
    /// Returns `PricingError::InvalidRateConfiguration` when the rates
    /// fail their sanity checks
    pub fn new(rates: RateConfig) -> Result<Self, PricingError> {
        rates.validate()?;
        Ok(ProposalAuditor {
            estimator: ScreenCostEstimator::new(),
            projector: PriceProjector::new(),
            rates,
        })
    }

    pub fn rates(&self) -> &RateConfig {
        &self.rates
    }

    /// Price every screen and aggregate the proposal audit.
    ///
    /// # Errors
    /// Returns `PricingError::EmptyProposal` when there are no screens
    pub fn audit(&self, proposal: &Proposal) -> Result<ProposalAudit, PricingError> {
        if proposal.is_empty() {
            return Err(PricingError::EmptyProposal);
        }

        debug!(
            proposal = %proposal.name,
            screens = proposal.screen_count(),
            "Starting proposal audit"
        );

        let mut ledger = RoundingLedger::new();
        let mut screen_audits = Vec::with_capacity(proposal.screens.len());
        let mut combined = CostBreakdown::zero();
        let mut sell_subtotal_raw = Decimal::ZERO;
        // Per-category sell accumulation across screens, aligned with
        // direct_categories() order
        let mut category_sells: Vec<(CostCategory, Decimal)> = CostBreakdown::zero()
            .direct_categories()
            .iter()
            .map(|(category, _)| (*category, Decimal::ZERO))
            .collect();

        for screen in &proposal.screens {
            let mut breakdown = self.estimator.estimate(screen, &self.rates);
            let direct_cost = breakdown.direct_total();
            let sell_price = self.projector.project(direct_cost, screen.desired_margin);
            breakdown.integrator_margin = sell_price - direct_cost;

            let projected = self
                .projector
                .project_categories(&breakdown, screen.desired_margin);
            for ((_, sell), (_, add)) in category_sells.iter_mut().zip(projected.iter()) {
                *sell += *add;
            }

            debug!(
                screen = %screen.name,
                direct_cost = %direct_cost,
                sell_price = %sell_price,
                margin = %screen.desired_margin,
                "Priced screen"
            );

            combined = combined.sum_with(&breakdown);
            sell_subtotal_raw += sell_price;
            screen_audits.push(ScreenAudit {
                name: screen.name.clone(),
                breakdown,
                direct_cost: Money::new(direct_cost)?,
                sell_price: Money::new(sell_price)?,
                desired_margin: screen.desired_margin,
            });
        }

        // The five canonical rounding checkpoints, in order. Bond and
        // taxes compound on the rounded subtotal so each stage's drift
        // is observable in isolation.
        let subtotal = ledger.round_category_total(sell_subtotal_raw, RoundingStage::Subtotal);
        let bond =
            ledger.round_category_total(subtotal * self.rates.bond_rate, RoundingStage::Bond);
        let business_occupancy_tax = ledger.round_category_total(
            (subtotal + bond) * self.rates.business_occupancy_tax_rate,
            RoundingStage::BusinessOccupancyTax,
        );
        let sales_tax = ledger.round_category_total(
            (subtotal + bond + business_occupancy_tax) * self.rates.sales_tax_rate,
            RoundingStage::SalesTax,
        );
        let final_client_total = ledger.round_category_total(
            subtotal + bond + business_occupancy_tax + sales_tax,
            RoundingStage::FinalTotal,
        );

        let rounding = ledger.summary();
        let generated_at = Utc::now();

        info!(
            proposal = %proposal.name,
            total_cost = %combined.direct_total(),
            final_client_total = %final_client_total,
            rounding_operations = rounding.operation_count,
            total_drift = %rounding.total_drift,
            "Completed proposal audit"
        );

        let totals = StageTotals {
            subtotal: Money::new(subtotal)?,
            bond: Money::new(bond)?,
            business_occupancy_tax: Money::new(business_occupancy_tax)?,
            sales_tax: Money::new(sales_tax)?,
            final_total: Money::new(final_client_total)?,
        };

        let client_summary =
            self.build_client_summary(proposal, &screen_audits, &category_sells, &totals, generated_at)?;

        let internal = InternalAudit {
            proposal_name: proposal.name.clone(),
            customer: proposal.customer.clone(),
            screens: screen_audits,
            total_cost: Money::new(combined.direct_total())?,
            combined_breakdown: combined,
            sell_subtotal: totals.subtotal,
            bond: totals.bond,
            business_occupancy_tax: totals.business_occupancy_tax,
            sales_tax: totals.sales_tax,
            final_client_total: totals.final_total,
            rounding,
            generated_at,
        };

        Ok(ProposalAudit {
            internal,
            client_summary,
        })
    }

    fn build_client_summary(
        &self,
        proposal: &Proposal,
        screen_audits: &[ScreenAudit],
        category_sells: &[(CostCategory, Decimal)],
        totals: &StageTotals,
        generated_at: DateTime<Utc>,
    ) -> Result<Value, PricingError> {
        let screens = proposal
            .screens
            .iter()
            .zip(screen_audits)
            .map(|(screen, audit)| ClientScreenLine {
                name: screen.name.clone(),
                quantity: screen.dimensions.quantity,
                width_ft: screen.dimensions.width_ft,
                height_ft: screen.dimensions.height_ft,
                pitch_mm: screen.dimensions.pitch_mm,
                sell_price: audit.sell_price.round_to_cents(),
            })
            .collect();

        let mut line_items = Vec::new();
        for (category, sell) in category_sells {
            if sell.is_zero() {
                continue;
            }
            line_items.push(ClientLineItem {
                category: category.label().to_string(),
                price: Money::new(*sell)?.round_to_cents(),
            });
        }

        let draft = ClientSummaryDraft {
            proposal_name: proposal.name.clone(),
            customer: proposal.customer.clone(),
            screens,
            line_items,
            subtotal: totals.subtotal,
            bond: totals.bond,
            business_occupancy_tax: totals.business_occupancy_tax,
            sales_tax: totals.sales_tax,
            final_total: totals.final_total,
            generated_at,
        };

        // Serialization cannot fail for this shape; fall back to an
        // empty object rather than leaking anything on the error path.
        let raw = serde_json::to_value(&draft).unwrap_or_else(|_| Value::Object(Default::default()));
        Ok(sanitize_for_client(&raw))
    }
}

/// The five ledger-rounded stage values, as money.
struct StageTotals {
    subtotal: Money,
    bond: Money,
    business_occupancy_tax: Money,
    sales_tax: Money,
    final_total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::screen::{Environment, ProductType, ScreenInput, ServiceType};
    use crate::domain::services::sanitizer::validate_sanitized;
    use crate::domain::value_objects::ScreenDimensions;
    use rust_decimal_macros::dec;

    fn proposal_with_one_screen() -> Proposal {
        let mut proposal = Proposal::new("Riverfront Arena").with_customer("Riverfront SD");
        proposal.add_screen(ScreenInput::new(
            "Main Videoboard",
            ProductType::VideoBoard,
            ScreenDimensions::new(dec!(20), dec!(10), 1, dec!(4)).unwrap(),
            Environment::Indoor,
            ServiceType::Turnkey,
            Margin::new(dec!(0.25)).unwrap(),
        ));
        proposal
    }

    #[test]
    fn test_empty_proposal_rejected() {
        let auditor = ProposalAuditor::new(RateConfig::default()).unwrap();
        let result = auditor.audit(&Proposal::new("Empty"));
        assert_eq!(result.unwrap_err(), PricingError::EmptyProposal);
    }

    #[test]
    fn test_invalid_rates_rejected_at_construction() {
        let mut rates = RateConfig::default();
        rates.sales_tax_rate = dec!(1.5);
        assert!(ProposalAuditor::new(rates).is_err());
    }

    #[test]
    fn test_audit_uses_exactly_the_five_stages() {
        let auditor = ProposalAuditor::new(RateConfig::default()).unwrap();
        let audit = auditor.audit(&proposal_with_one_screen()).unwrap();
        let rounding = &audit.internal.rounding;
        assert_eq!(rounding.operation_count, 5);
        assert!(rounding.all_half_even);
        assert!(rounding.only_category_totals);
    }

    #[test]
    fn test_screen_margin_dollars_consistent_with_sell() {
        let auditor = ProposalAuditor::new(RateConfig::default()).unwrap();
        let audit = auditor.audit(&proposal_with_one_screen()).unwrap();
        let screen = &audit.internal.screens[0];
        assert_eq!(
            screen.breakdown.integrator_margin,
            screen.sell_price.value() - screen.direct_cost.value()
        );
    }

    #[test]
    fn test_totals_sum_category_by_category() {
        let mut proposal = proposal_with_one_screen();
        proposal.add_screen(ScreenInput::new(
            "Ribbon East",
            ProductType::RibbonBoard,
            ScreenDimensions::new(dec!(60), dec!(3), 1, dec!(10)).unwrap(),
            Environment::Indoor,
            ServiceType::Turnkey,
            Margin::new(dec!(0.30)).unwrap(),
        ));
        let auditor = ProposalAuditor::new(RateConfig::default()).unwrap();
        let audit = auditor.audit(&proposal).unwrap();

        let summed_hardware: Decimal = audit
            .internal
            .screens
            .iter()
            .map(|s| s.breakdown.hardware)
            .sum();
        assert_eq!(audit.internal.combined_breakdown.hardware, summed_hardware);
        assert_eq!(
            audit.internal.total_cost.value(),
            audit.internal.combined_breakdown.direct_total()
        );
    }

    #[test]
    fn test_final_total_is_sum_of_rounded_stages() {
        let auditor = ProposalAuditor::new(RateConfig::default()).unwrap();
        let audit = auditor.audit(&proposal_with_one_screen()).unwrap();
        let internal = &audit.internal;
        // Every stage is already rounded to cents, so the final total
        // equals the plain sum of the stage values
        assert_eq!(
            internal.final_client_total,
            internal.sell_subtotal
                + internal.bond
                + internal.business_occupancy_tax
                + internal.sales_tax
        );
    }

    #[test]
    fn test_client_summary_is_sanitized() {
        let auditor = ProposalAuditor::new(RateConfig::default()).unwrap();
        let audit = auditor.audit(&proposal_with_one_screen()).unwrap();
        assert!(validate_sanitized(&audit.client_summary));
        // Structural rows are dropped from exported line items
        let items = audit.client_summary["line_items"].as_array().unwrap();
        assert!(items
            .iter()
            .all(|item| !item["category"].as_str().unwrap().contains("Structure")));
    }

    #[test]
    fn test_zero_dimension_screen_prices_to_zero_but_audit_succeeds() {
        let mut proposal = Proposal::new("Draft");
        proposal.add_screen(ScreenInput::new(
            "Unsized Board",
            ProductType::VideoBoard,
            ScreenDimensions::new(Decimal::ZERO, Decimal::ZERO, 0, Decimal::ZERO).unwrap(),
            Environment::Indoor,
            ServiceType::Turnkey,
            Margin::new(dec!(0.25)).unwrap(),
        ));
        let auditor = ProposalAuditor::new(RateConfig::default()).unwrap();
        let audit = auditor.audit(&proposal).unwrap();
        assert!(audit.internal.total_cost.is_zero());
        assert!(audit.internal.final_client_total.is_zero());
    }
}
