use rust_decimal::Decimal;

use crate::config::RateConfig;
use crate::domain::entities::screen::ScreenInput;

/// Derived ("soft") cost categories: labor, management overhead,
/// engineering, permits, control systems.
///
/// Unlike the hard categories these are functions of other category
/// totals (PM on prime cost, engineering on structure), so the
/// estimator passes the relevant bases in explicitly.
#[derive(Debug, Clone, Default)]
pub struct SoftCostSchedule;

impl SoftCostSchedule {
    pub fn new() -> Self {
        Self
    }

    /// Commissioning/alignment labor, hour-rate over display area.
    pub fn field_labor(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal {
        if !screen.service_type.includes_site_work() || !screen.dimensions.is_priceable() {
            return Decimal::ZERO;
        }
        let hours = screen.dimensions.total_area_sqft() * rates.field_labor_hours_per_sqft;
        hours * rates.field_labor_rate_per_hour
    }

    /// PM percentage on prime cost (hardware + structure + installation).
    pub fn project_management(&self, prime_cost: Decimal, rates: &RateConfig) -> Decimal {
        prime_cost * rates.project_management_pct
    }

    /// General conditions percentage on all direct costs accrued so far.
    pub fn general_conditions(&self, direct_cost: Decimal, rates: &RateConfig) -> Decimal {
        direct_cost * rates.general_conditions_pct
    }

    /// Shop drawing / submittal package, flat per line item.
    pub fn submittals(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal {
        if !screen.dimensions.is_priceable() {
            return Decimal::ZERO;
        }
        rates.submittals_flat
    }

    /// Structural engineering with PE-stamp minimum; only owed where
    /// there is structure to engineer.
    pub fn engineering(&self, structure_cost: Decimal, rates: &RateConfig) -> Decimal {
        if structure_cost.is_zero() {
            return Decimal::ZERO;
        }
        (structure_cost * rates.engineering_pct_of_structure).max(rates.engineering_minimum)
    }

    /// Building/electrical permits on the installed value, with a floor.
    pub fn permits(
        &self,
        screen: &ScreenInput,
        installed_value: Decimal,
        rates: &RateConfig,
    ) -> Decimal {
        if !screen.service_type.includes_site_work() || installed_value.is_zero() {
            return Decimal::ZERO;
        }
        (installed_value * rates.permits_pct).max(rates.permits_minimum)
    }

    /// Control system: sending unit per screen plus area-scaled
    /// receiving cards.
    pub fn cms(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal {
        if !screen.service_type.includes_hardware() || !screen.dimensions.is_priceable() {
            return Decimal::ZERO;
        }
        let controllers = rates.cms_controller_cost * Decimal::from(screen.dimensions.quantity);
        controllers + screen.dimensions.total_area_sqft() * rates.cms_rate_per_sqft
    }
}
