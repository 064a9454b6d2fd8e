use tracing::debug;

use crate::config::RateConfig;
use crate::domain::entities::cost_breakdown::CostBreakdown;
use crate::domain::entities::screen::ScreenInput;
use crate::domain::services::costing::hardware::{HardwareCostCalculator, TieredHardwareCalculator};
use crate::domain::services::costing::installation::{
    AreaRateInstallCalculator, AreaRatePowerCalculator, InstallationCostCalculator,
    PowerCostCalculator,
};
use crate::domain::services::costing::logistics::{
    ShippingCostCalculator, TravelCostCalculator, TripCountTravelCalculator,
    WeightBasedShippingCalculator,
};
use crate::domain::services::costing::soft_costs::SoftCostSchedule;
use crate::domain::services::costing::structure::{
    MountFactorStructureCalculator, StructureCostCalculator,
};

/// Assembles a full-precision [`CostBreakdown`] for one screen from the
/// per-category calculators.
///
/// Pure with respect to its inputs: same screen and rates, same
/// breakdown. Nothing in here rounds; currency rounding is owned by the
/// audit aggregation.
pub struct ScreenCostEstimator {
    hardware_calc: TieredHardwareCalculator,
    structure_calc: MountFactorStructureCalculator,
    install_calc: AreaRateInstallCalculator,
    power_calc: AreaRatePowerCalculator,
    shipping_calc: WeightBasedShippingCalculator,
    travel_calc: TripCountTravelCalculator,
    soft_costs: SoftCostSchedule,
}

impl Default for ScreenCostEstimator {
    fn default() -> Self {
        ScreenCostEstimator {
            hardware_calc: TieredHardwareCalculator::default(),
            structure_calc: MountFactorStructureCalculator::default(),
            install_calc: AreaRateInstallCalculator::default(),
            power_calc: AreaRatePowerCalculator::default(),
            shipping_calc: WeightBasedShippingCalculator::default(),
            travel_calc: TripCountTravelCalculator::default(),
            soft_costs: SoftCostSchedule::default(),
        }
    }
}

impl ScreenCostEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate the cost breakdown of one screen.
    ///
    /// Screens with missing or zero dimensions degrade to an all-zero
    /// breakdown so an in-progress proposal still renders.
    pub fn estimate(&self, screen: &ScreenInput, rates: &RateConfig) -> CostBreakdown {
        if !screen.dimensions.is_priceable() {
            debug!(
                screen = %screen.name,
                "Screen has incomplete dimensions, degrading to zero breakdown"
            );
            return CostBreakdown::zero();
        }

        let mut breakdown = CostBreakdown::zero();

        breakdown.hardware = self.hardware_calc.calculate(screen, rates);
        breakdown.structure = self.structure_calc.calculate(screen, rates);
        breakdown.installation = self.install_calc.calculate(screen, rates);
        breakdown.power = self.power_calc.calculate(screen, rates);
        breakdown.shipping = self.shipping_calc.calculate(screen, rates);
        breakdown.field_labor = self.soft_costs.field_labor(screen, rates);
        breakdown.travel = self.travel_calc.calculate(screen, rates);
        breakdown.submittals = self.soft_costs.submittals(screen, rates);
        breakdown.engineering = self.soft_costs.engineering(breakdown.structure, rates);

        let installed_value =
            self.hardware_calc.panel_value(screen, rates) + breakdown.structure;
        breakdown.permits = self.soft_costs.permits(screen, installed_value, rates);
        breakdown.cms = self.soft_costs.cms(screen, rates);

        let prime_cost = breakdown.hardware + breakdown.structure + breakdown.installation;
        breakdown.project_management = self.soft_costs.project_management(prime_cost, rates);

        // GC percentage applies to every direct dollar accrued above
        let direct_before_gc = breakdown.direct_total();
        breakdown.general_conditions = self.soft_costs.general_conditions(direct_before_gc, rates);

        debug!(
            screen = %screen.name,
            area_sqft = %screen.dimensions.total_area_sqft(),
            hardware = %breakdown.hardware,
            structure = %breakdown.structure,
            installation = %breakdown.installation,
            direct_total = %breakdown.direct_total(),
            "Estimated screen cost breakdown"
        );

        breakdown
    }
}
