use rust_decimal::Decimal;

use crate::config::RateConfig;
use crate::domain::entities::screen::ScreenInput;

/// Calculates hanging/mounting labor cost
pub trait InstallationCostCalculator {
    fn calculate(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal;
}

/// Calculates power distribution cost (PDUs, circuits, conduit)
pub trait PowerCostCalculator {
    fn calculate(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal;
}

/// Default area-rate installation cost
#[derive(Debug, Clone, Default)]
pub struct AreaRateInstallCalculator;

impl AreaRateInstallCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl InstallationCostCalculator for AreaRateInstallCalculator {
    fn calculate(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal {
        if !screen.service_type.includes_site_work() || !screen.dimensions.is_priceable() {
            return Decimal::ZERO;
        }
        screen.dimensions.total_area_sqft() * rates.install_rate_per_sqft
    }
}

/// Default area-rate power distribution cost
#[derive(Debug, Clone, Default)]
pub struct AreaRatePowerCalculator;

impl AreaRatePowerCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl PowerCostCalculator for AreaRatePowerCalculator {
    fn calculate(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal {
        if !screen.service_type.includes_site_work() || !screen.dimensions.is_priceable() {
            return Decimal::ZERO;
        }
        screen.dimensions.total_area_sqft() * rates.power_rate_per_sqft
    }
}
