use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Margin, ScreenDimensions};

/// Kind of display product being quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
    /// Main video display (centerhung, end-wall, outdoor board)
    VideoBoard,
    /// Long, short ribbon/fascia display
    RibbonBoard,
    /// Scoreboard with integrated video
    Scoreboard,
    /// Street-facing marquee
    Marquee,
    /// General digital signage
    DigitalSignage,
}

/// Installation environment; outdoor product carries weatherization cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Indoor,
    Outdoor,
}

/// Scope of services sold with the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    /// Hardware, structure and installation
    Turnkey,
    /// Hardware shipped, customer installs
    SupplyOnly,
    /// Labor only on customer-furnished hardware
    InstallOnly,
}

impl ServiceType {
    /// True when we furnish the LED hardware (and ship it).
    pub fn includes_hardware(&self) -> bool {
        matches!(self, ServiceType::Turnkey | ServiceType::SupplyOnly)
    }

    /// True when our crews are on site (structure, install, power, travel).
    pub fn includes_site_work(&self) -> bool {
        matches!(self, ServiceType::Turnkey | ServiceType::InstallOnly)
    }
}

/// One priced display line item on a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenInput {
    /// Label as it appears on the proposal (e.g., "Main Videoboard")
    pub name: String,
    pub product_type: ProductType,
    pub dimensions: ScreenDimensions,
    pub environment: Environment,
    pub service_type: ServiceType,
    /// Profit fraction of sell price the salesperson is targeting
    pub desired_margin: Margin,
}

impl ScreenInput {
    pub fn new(
        name: impl Into<String>,
        product_type: ProductType,
        dimensions: ScreenDimensions,
        environment: Environment,
        service_type: ServiceType,
        desired_margin: Margin,
    ) -> Self {
        ScreenInput {
            name: name.into(),
            product_type,
            dimensions,
            environment,
            service_type,
            desired_margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_screen_input_construction() {
        let screen = ScreenInput::new(
            "Main Videoboard",
            ProductType::VideoBoard,
            ScreenDimensions::new(dec!(20), dec!(10), 1, dec!(4)).unwrap(),
            Environment::Indoor,
            ServiceType::Turnkey,
            Margin::new(dec!(0.25)).unwrap(),
        );
        assert_eq!(screen.name, "Main Videoboard");
        assert!(screen.dimensions.is_priceable());
    }

    #[test]
    fn test_screen_input_serde_round_trip() {
        let screen = ScreenInput::new(
            "Ribbon East",
            ProductType::RibbonBoard,
            ScreenDimensions::new(dec!(120), dec!(3), 2, dec!(10)).unwrap(),
            Environment::Outdoor,
            ServiceType::SupplyOnly,
            Margin::new(dec!(0.30)).unwrap(),
        );
        let json = serde_json::to_string(&screen).unwrap();
        let back: ScreenInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, screen);
    }
}
