use rust_decimal::Decimal;

use crate::config::RateConfig;
use crate::domain::entities::screen::ScreenInput;

/// Calculates freight cost for crated panels
pub trait ShippingCostCalculator {
    fn calculate(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal;
}

/// Calculates site-trip travel cost
pub trait TravelCostCalculator {
    fn calculate(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal;
}

/// Default weight-based freight estimate
#[derive(Debug, Clone, Default)]
pub struct WeightBasedShippingCalculator;

impl WeightBasedShippingCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl ShippingCostCalculator for WeightBasedShippingCalculator {
    fn calculate(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal {
        if !screen.service_type.includes_hardware() || !screen.dimensions.is_priceable() {
            return Decimal::ZERO;
        }
        let weight_lbs = screen.dimensions.total_area_sqft() * rates.shipping_weight_lbs_per_sqft;
        weight_lbs * rates.shipping_rate_per_lb
    }
}

/// Default trip-count travel estimate: one site trip per block of
/// display area, minimum one trip whenever crews go on site.
#[derive(Debug, Clone, Default)]
pub struct TripCountTravelCalculator;

impl TripCountTravelCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl TravelCostCalculator for TripCountTravelCalculator {
    fn calculate(&self, screen: &ScreenInput, rates: &RateConfig) -> Decimal {
        if !screen.service_type.includes_site_work() || !screen.dimensions.is_priceable() {
            return Decimal::ZERO;
        }
        let trips = if rates.sqft_per_trip.is_zero() {
            Decimal::ONE
        } else {
            (screen.dimensions.total_area_sqft() / rates.sqft_per_trip)
                .ceil()
                .max(Decimal::ONE)
        };
        trips * rates.travel_cost_per_trip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::screen::{Environment, ProductType, ServiceType};
    use crate::domain::value_objects::{Margin, ScreenDimensions};
    use rust_decimal_macros::dec;

    fn screen(width: Decimal, service: ServiceType) -> ScreenInput {
        ScreenInput::new(
            "Test",
            ProductType::VideoBoard,
            ScreenDimensions::new(width, dec!(10), 1, dec!(4)).unwrap(),
            Environment::Indoor,
            service,
            Margin::new(dec!(0.25)).unwrap(),
        )
    }

    #[test]
    fn test_shipping_weight_model() {
        let calc = WeightBasedShippingCalculator::new();
        let rates = RateConfig::default();
        // 200 sqft * 8.5 lbs * $0.62
        assert_eq!(
            calc.calculate(&screen(dec!(20), ServiceType::Turnkey), &rates),
            dec!(1054.00)
        );
    }

    #[test]
    fn test_shipping_zero_for_install_only() {
        let calc = WeightBasedShippingCalculator::new();
        let rates = RateConfig::default();
        assert_eq!(
            calc.calculate(&screen(dec!(20), ServiceType::InstallOnly), &rates),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_travel_minimum_one_trip() {
        let calc = TripCountTravelCalculator::new();
        let rates = RateConfig::default();
        // 200 sqft is under one trip block
        assert_eq!(
            calc.calculate(&screen(dec!(20), ServiceType::Turnkey), &rates),
            dec!(3500)
        );
    }

    #[test]
    fn test_travel_scales_with_area_blocks() {
        let calc = TripCountTravelCalculator::new();
        let rates = RateConfig::default();
        // 250 ft x 10 ft = 2500 sqft -> 3 trips
        assert_eq!(
            calc.calculate(&screen(dec!(250), ServiceType::Turnkey), &rates),
            dec!(10500)
        );
    }

    #[test]
    fn test_travel_zero_for_supply_only() {
        let calc = TripCountTravelCalculator::new();
        let rates = RateConfig::default();
        assert_eq!(
            calc.calculate(&screen(dec!(20), ServiceType::SupplyOnly), &rates),
            Decimal::ZERO
        );
    }
}
