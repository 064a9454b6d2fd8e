use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::errors::PricingError;

/// Hardware price tier: screens at or under this pitch cost this much
/// per square foot. Finer pitch means more LEDs per panel and a higher
/// rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchTier {
    pub max_pitch_mm: Decimal,
    pub rate_per_sqft: Decimal,
}

/// Global pricing rates applied to every screen on a proposal.
///
/// Defaults reflect current vendor and labor pricing; individual rates
/// can be overridden per deployment through environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateConfig {
    pub hardware_rate_tiers: Vec<PitchTier>, // ascending by max_pitch_mm; last tier is the catch-all
    pub outdoor_hardware_factor: Decimal,    // weatherized product premium on hardware
    pub structure_factor_indoor: Decimal,    // steel as a fraction of hardware cost
    pub structure_factor_outdoor: Decimal,   // outdoor steel carries wind-load engineering
    pub install_rate_per_sqft: Decimal,
    pub power_rate_per_sqft: Decimal,
    pub shipping_weight_lbs_per_sqft: Decimal, // crated panel weight estimate
    pub shipping_rate_per_lb: Decimal,
    pub field_labor_hours_per_sqft: Decimal, // commissioning/alignment labor
    pub field_labor_rate_per_hour: Decimal,
    pub project_management_pct: Decimal, // of hardware + structure + installation
    pub general_conditions_pct: Decimal, // of direct costs before GC
    pub travel_cost_per_trip: Decimal,
    pub sqft_per_trip: Decimal, // one site trip per this much display area
    pub submittals_flat: Decimal, // shop drawings / submittal package per line item
    pub engineering_pct_of_structure: Decimal,
    pub engineering_minimum: Decimal, // PE stamp minimum per engineered screen
    pub permits_pct: Decimal,         // of hardware + structure
    pub permits_minimum: Decimal,
    pub cms_controller_cost: Decimal, // sending unit + processor per screen
    pub cms_rate_per_sqft: Decimal,   // receiving cards scale with area
    pub bond_rate: Decimal,           // performance bond on the sell subtotal
    pub business_occupancy_tax_rate: Decimal, // B&O, retailing classification
    pub sales_tax_rate: Decimal,
}

impl Default for RateConfig {
    fn default() -> Self {
        RateConfig {
            hardware_rate_tiers: vec![
                PitchTier {
                    max_pitch_mm: Decimal::new(25, 1), // <= 2.5 mm fine pitch
                    rate_per_sqft: Decimal::new(1200, 0),
                },
                PitchTier {
                    max_pitch_mm: Decimal::new(4, 0),
                    rate_per_sqft: Decimal::new(850, 0),
                },
                PitchTier {
                    max_pitch_mm: Decimal::new(6, 0),
                    rate_per_sqft: Decimal::new(600, 0),
                },
                PitchTier {
                    max_pitch_mm: Decimal::new(10, 0),
                    rate_per_sqft: Decimal::new(400, 0),
                },
                PitchTier {
                    max_pitch_mm: Decimal::new(100, 0), // catch-all coarse pitch
                    rate_per_sqft: Decimal::new(300, 0),
                },
            ],
            outdoor_hardware_factor: Decimal::new(115, 2), // 1.15
            structure_factor_indoor: Decimal::new(18, 2),  // 18% of hardware
            structure_factor_outdoor: Decimal::new(35, 2), // 35% of hardware
            install_rate_per_sqft: Decimal::new(2850, 2),  // $28.50/sqft
            power_rate_per_sqft: Decimal::new(12, 0),
            shipping_weight_lbs_per_sqft: Decimal::new(85, 1), // 8.5 lbs/sqft crated
            shipping_rate_per_lb: Decimal::new(62, 2),         // $0.62/lb
            field_labor_hours_per_sqft: Decimal::new(35, 2),   // 0.35 h/sqft
            field_labor_rate_per_hour: Decimal::new(85, 0),
            project_management_pct: Decimal::new(8, 2), // 8%
            general_conditions_pct: Decimal::new(5, 2), // 5%
            travel_cost_per_trip: Decimal::new(3500, 0),
            sqft_per_trip: Decimal::new(1000, 0),
            submittals_flat: Decimal::new(1800, 0),
            engineering_pct_of_structure: Decimal::new(12, 2), // 12%
            engineering_minimum: Decimal::new(2500, 0),
            permits_pct: Decimal::new(15, 3), // 1.5%
            permits_minimum: Decimal::new(500, 0),
            cms_controller_cost: Decimal::new(4200, 0),
            cms_rate_per_sqft: Decimal::new(28, 1), // $2.80/sqft
            bond_rate: Decimal::new(15, 3),         // 1.5%
            business_occupancy_tax_rate: Decimal::new(471, 5), // 0.471%
            sales_tax_rate: Decimal::new(95, 3),    // 9.5%
        }
    }
}

impl RateConfig {
    /// Load defaults, then apply environment overrides for the rates
    /// that vary per deployment.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(rate) = decimal_env("LEDQUOTE_BOND_RATE") {
            config.bond_rate = rate;
        }
        if let Some(rate) = decimal_env("LEDQUOTE_BO_TAX_RATE") {
            config.business_occupancy_tax_rate = rate;
        }
        if let Some(rate) = decimal_env("LEDQUOTE_SALES_TAX_RATE") {
            config.sales_tax_rate = rate;
        }
        if let Some(rate) = decimal_env("LEDQUOTE_INSTALL_RATE_PER_SQFT") {
            config.install_rate_per_sqft = rate;
        }
        if let Some(rate) = decimal_env("LEDQUOTE_FIELD_LABOR_RATE") {
            config.field_labor_rate_per_hour = rate;
        }

        config
    }

    /// Sanity-check the rate tables before pricing with them.
    ///
    /// # Errors
    /// Returns `PricingError::InvalidRateConfiguration` naming the first
    /// offending rate
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.hardware_rate_tiers.is_empty() {
            return Err(PricingError::InvalidRateConfiguration(
                "hardware rate tiers must not be empty".to_string(),
            ));
        }
        for window in self.hardware_rate_tiers.windows(2) {
            if window[0].max_pitch_mm >= window[1].max_pitch_mm {
                return Err(PricingError::InvalidRateConfiguration(
                    "hardware rate tiers must ascend by pitch".to_string(),
                ));
            }
        }
        let percentages = [
            ("project_management_pct", self.project_management_pct),
            ("general_conditions_pct", self.general_conditions_pct),
            (
                "engineering_pct_of_structure",
                self.engineering_pct_of_structure,
            ),
            ("permits_pct", self.permits_pct),
            ("bond_rate", self.bond_rate),
            (
                "business_occupancy_tax_rate",
                self.business_occupancy_tax_rate,
            ),
            ("sales_tax_rate", self.sales_tax_rate),
        ];
        for (name, value) in percentages {
            if value < Decimal::ZERO || value >= Decimal::ONE {
                return Err(PricingError::InvalidRateConfiguration(format!(
                    "{} must be in [0, 1), got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

fn decimal_env(key: &str) -> Option<Decimal> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}
