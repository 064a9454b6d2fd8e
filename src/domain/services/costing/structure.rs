use rust_decimal::Decimal;

use crate::config::RateConfig;
use crate::domain::entities::screen::{Environment, ScreenInput};
use crate::domain::services::costing::hardware::TieredHardwareCalculator;

/// Calculates mounting structure and steel cost
pub trait StructureCostCalculator {
    fn calculate(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal;
}

/// Default implementation: steel scales with the panel value being hung.
///
/// Outdoor structure carries the wind-load factor. Based on panel value
/// rather than carried hardware cost so install-only scope (customer
/// furnishes panels, we build the structure) still prices the steel.
#[derive(Debug, Clone, Default)]
pub struct MountFactorStructureCalculator {
    hardware: TieredHardwareCalculator,
}

impl MountFactorStructureCalculator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StructureCostCalculator for MountFactorStructureCalculator {
    fn calculate(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal {
        if !screen.service_type.includes_site_work() {
            return Decimal::ZERO;
        }
        let panel_value = self.hardware.panel_value(screen, rates);
        let factor = match screen.environment {
            Environment::Outdoor => rates.structure_factor_outdoor,
            Environment::Indoor => rates.structure_factor_indoor,
        };
        panel_value * factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::screen::{ProductType, ServiceType};
    use crate::domain::value_objects::{Margin, ScreenDimensions};
    use rust_decimal_macros::dec;

    fn screen(env: Environment, service: ServiceType) -> ScreenInput {
        ScreenInput::new(
            "Test",
            ProductType::VideoBoard,
            ScreenDimensions::new(dec!(20), dec!(10), 1, dec!(4)).unwrap(),
            env,
            service,
            Margin::new(dec!(0.25)).unwrap(),
        )
    }

    #[test]
    fn test_indoor_structure_fraction_of_panel_value() {
        let calc = MountFactorStructureCalculator::new();
        let rates = RateConfig::default();
        let cost = calc.calculate(&screen(Environment::Indoor, ServiceType::Turnkey), &rates);
        // 170,000 panel value * 0.18
        assert_eq!(cost, dec!(30600));
    }

    #[test]
    fn test_outdoor_structure_uses_wind_load_factor() {
        let calc = MountFactorStructureCalculator::new();
        let rates = RateConfig::default();
        let cost = calc.calculate(&screen(Environment::Outdoor, ServiceType::Turnkey), &rates);
        // 170,000 * 1.15 outdoor premium * 0.35
        assert_eq!(cost, dec!(170000) * dec!(1.15) * dec!(0.35));
    }

    #[test]
    fn test_supply_only_has_no_structure() {
        let calc = MountFactorStructureCalculator::new();
        let rates = RateConfig::default();
        let cost = calc.calculate(&screen(Environment::Indoor, ServiceType::SupplyOnly), &rates);
        assert_eq!(cost, Decimal::ZERO);
    }

    #[test]
    fn test_install_only_still_prices_structure() {
        let calc = MountFactorStructureCalculator::new();
        let rates = RateConfig::default();
        let cost = calc.calculate(&screen(Environment::Indoor, ServiceType::InstallOnly), &rates);
        assert_eq!(cost, dec!(30600));
    }
}
