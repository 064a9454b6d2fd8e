use rust_decimal::Decimal;

use crate::config::RateConfig;
use crate::domain::entities::screen::{Environment, ScreenInput};

/// Calculates the LED panel cost of a screen
pub trait HardwareCostCalculator {
    /// Hardware cost we actually carry for this screen.
    /// Zero for unpriceable dimensions and for install-only scope.
    fn calculate(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal;
}

/// Default implementation using pitch-tier pricing.
///
/// The $/sqft rate comes from the first tier whose max pitch covers the
/// screen's pitch (finer pitch, more LEDs, higher rate); outdoor
/// product carries the weatherization premium.
#[derive(Debug, Clone, Default)]
pub struct TieredHardwareCalculator;

impl TieredHardwareCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Market value of the panels regardless of who furnishes them.
    ///
    /// Structure and permits scale with what is being hung on the
    /// building, even when the customer supplies the panels, so this
    /// is intentionally not gated by service type.
    pub fn panel_value(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal {
        let dims = &screen.dimensions;
        if !dims.is_priceable() {
            return Decimal::ZERO;
        }

        let rate = rates
            .hardware_rate_tiers
            .iter()
            .find(|tier| dims.pitch_mm <= tier.max_pitch_mm)
            .or_else(|| rates.hardware_rate_tiers.last())
            .map(|tier| tier.rate_per_sqft)
            .unwrap_or(Decimal::ZERO);

        let base = dims.total_area_sqft() * rate;
        match screen.environment {
            Environment::Outdoor => base * rates.outdoor_hardware_factor,
            Environment::Indoor => base,
        }
    }
}

impl HardwareCostCalculator for TieredHardwareCalculator {
    fn calculate(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal {
        if !screen.service_type.includes_hardware() {
            return Decimal::ZERO;
        }
        self.panel_value(screen, rates)
    }
}
