// Pressure readings and unit conversion
use super::error::{ParseError, ParseResult};

/// 1 mmH₂O expressed in kPa (conventional water density × standard gravity).
pub const MMH2O_TO_KPA: f64 = 0.00980665;

/// Human-readable form of the conversion used on calibration screens.
pub const CONVERSION_NOTE: &str = "1 mmH₂O = 0.00980665 kPa";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressureUnit {
    /// Millimeters of water column, read off the reference manometer
    MmH2O,
    /// Kilopascal, shown by the device under calibration
    KPa,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureReading {
    pub value: f64,
    pub unit: PressureUnit,
}

impl PressureReading {
    pub fn new(value: f64, unit: PressureUnit) -> Self {
        Self { value, unit }
    }

    /// Parse a free-form field, failing with `on_error` if it is not numeric.
    pub fn parse(raw: &str, unit: PressureUnit, on_error: ParseError) -> ParseResult<Self> {
        parse_decimal(raw)
            .map(|value| Self::new(value, unit))
            .ok_or(on_error)
    }

    pub fn to_kpa(&self) -> f64 {
        match self.unit {
            PressureUnit::MmH2O => self.value * MMH2O_TO_KPA,
            PressureUnit::KPa => self.value,
        }
    }
}

/// Parse a decimal that may use a comma as the decimal separator.
///
/// Surrounding whitespace is ignored. Anything that is not a complete finite
/// number yields `None`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
