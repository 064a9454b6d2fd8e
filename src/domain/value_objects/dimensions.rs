use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// Millimeters per foot, exact.
const MM_PER_FOOT: Decimal = Decimal::from_parts(3048, 0, 0, false, 1);

/// Physical dimensions of one display line item.
///
/// Zero width, height or quantity is allowed: an in-progress proposal
/// often has screens without dimensions yet, and those must price to an
/// all-zero breakdown instead of failing. Negative dimensions are a
/// data-entry error and are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenDimensions {
    /// Display width in feet
    pub width_ft: Decimal,
    /// Display height in feet
    pub height_ft: Decimal,
    /// Number of identical displays on this line item
    pub quantity: u32,
    /// Pixel pitch in millimeters (distance between pixel centers)
    pub pitch_mm: Decimal,
}

impl ScreenDimensions {
    /// Create screen dimensions
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidDimensions` when any measurement
    /// is negative
    pub fn new(
        width_ft: Decimal,
        height_ft: Decimal,
        quantity: u32,
        pitch_mm: Decimal,
    ) -> Result<Self, ValidationError> {
        if width_ft.is_sign_negative() && !width_ft.is_zero() {
            return Err(ValidationError::InvalidDimensions(format!(
                "width must be non-negative, got {}",
                width_ft
            )));
        }
        if height_ft.is_sign_negative() && !height_ft.is_zero() {
            return Err(ValidationError::InvalidDimensions(format!(
                "height must be non-negative, got {}",
                height_ft
            )));
        }
        if pitch_mm.is_sign_negative() && !pitch_mm.is_zero() {
            return Err(ValidationError::InvalidDimensions(format!(
                "pixel pitch must be non-negative, got {}",
                pitch_mm
            )));
        }
        Ok(ScreenDimensions {
            width_ft,
            height_ft,
            quantity,
            pitch_mm,
        })
    }

    /// True when every measurement needed for pricing is present.
    pub fn is_priceable(&self) -> bool {
        self.width_ft > Decimal::ZERO
            && self.height_ft > Decimal::ZERO
            && self.quantity > 0
            && self.pitch_mm > Decimal::ZERO
    }

    /// Display face area of a single unit in square feet.
    pub fn unit_area_sqft(&self) -> Decimal {
        self.width_ft * self.height_ft
    }

    /// Total display area across all units in square feet.
    pub fn total_area_sqft(&self) -> Decimal {
        self.unit_area_sqft() * Decimal::from(self.quantity)
    }

    /// Pixel columns of one unit, derived from width and pitch.
    pub fn pixel_columns(&self) -> u64 {
        self.pixels_along(self.width_ft)
    }

    /// Pixel rows of one unit, derived from height and pitch.
    pub fn pixel_rows(&self) -> u64 {
        self.pixels_along(self.height_ft)
    }

    /// Total pixels across all units.
    pub fn total_pixels(&self) -> u64 {
        self.pixel_columns() * self.pixel_rows() * u64::from(self.quantity)
    }

    fn pixels_along(&self, length_ft: Decimal) -> u64 {
        if self.pitch_mm.is_zero() || length_ft <= Decimal::ZERO {
            return 0;
        }
        let pixels = (length_ft * MM_PER_FOOT / self.pitch_mm).floor();
        pixels.to_u64().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_dimensions_new_valid() {
        let dims = ScreenDimensions::new(dec!(20), dec!(10), 1, dec!(4)).unwrap();
        assert!(dims.is_priceable());
    }

    #[test]
    fn test_dimensions_negative_width_rejected() {
        assert!(ScreenDimensions::new(dec!(-20), dec!(10), 1, dec!(4)).is_err());
    }

    #[test]
    fn test_dimensions_negative_pitch_rejected() {
        assert!(ScreenDimensions::new(dec!(20), dec!(10), 1, dec!(-4)).is_err());
    }

    #[test]
    fn test_dimensions_zero_allowed_but_not_priceable() {
        let dims = ScreenDimensions::new(Decimal::ZERO, dec!(10), 1, dec!(4)).unwrap();
        assert!(!dims.is_priceable());
    }

    #[test]
    fn test_dimensions_zero_quantity_not_priceable() {
        let dims = ScreenDimensions::new(dec!(20), dec!(10), 0, dec!(4)).unwrap();
        assert!(!dims.is_priceable());
    }

    #[test]
    fn test_total_area() {
        let dims = ScreenDimensions::new(dec!(20), dec!(10), 2, dec!(4)).unwrap();
        assert_eq!(dims.unit_area_sqft(), dec!(200));
        assert_eq!(dims.total_area_sqft(), dec!(400));
    }

    #[test]
    fn test_pixel_matrix_from_pitch() {
        // 20 ft = 6096 mm, at 4 mm pitch -> 1524 columns
        let dims = ScreenDimensions::new(dec!(20), dec!(10), 1, dec!(4)).unwrap();
        assert_eq!(dims.pixel_columns(), 1524);
        assert_eq!(dims.pixel_rows(), 762);
        assert_eq!(dims.total_pixels(), 1524 * 762);
    }

    #[test]
    fn test_pixels_zero_pitch_degrades_to_zero() {
        let dims = ScreenDimensions::new(dec!(20), dec!(10), 1, Decimal::ZERO).unwrap();
        assert_eq!(dims.total_pixels(), 0);
    }
}
