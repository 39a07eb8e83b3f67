// Calibration service - Use case for comparing a device against the manometer
use crate::domain::calibration::{CalibrationReport, CalibrationStatus, Tolerance};
use crate::domain::error::{ParseError, ParseResult};
use crate::domain::pressure::{PressureReading, PressureUnit};

#[derive(Debug, Clone, Copy)]
pub struct CalibrationService {
    tolerance: Tolerance,
}

impl CalibrationService {
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Convert the manometer reading to kPa and compare it with the device.
    pub fn compute_calibration(
        &self,
        reference_raw: &str,
        device_raw: &str,
    ) -> ParseResult<CalibrationReport> {
        let reference = PressureReading::parse(reference_raw, PressureUnit::MmH2O, ParseError::Pressure);
        let device = PressureReading::parse(device_raw, PressureUnit::KPa, ParseError::Pressure);

        let (reference, device) = match (reference, device) {
            (Ok(reference), Ok(device)) => (reference, device),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(
                    "Rejected pressure input: reference={:?}, device={:?}",
                    reference_raw, device_raw
                );
                return Err(e);
            }
        };

        let report = CalibrationReport::from_readings(reference, device);
        if !report.is_finite() {
            tracing::warn!(
                "Rejected pressure input out of range: reference={:?}, device={:?}",
                reference_raw, device_raw
            );
            return Err(ParseError::Pressure);
        }

        tracing::debug!(
            "Calibration computed: reference={:.4} kPa, error={:.4} kPa, status={:?}",
            report.reference_pressure_kpa,
            report.error_kpa,
            self.classify(&report)
        );

        Ok(report)
    }

    /// Status under the current tolerance. Not stored on the report.
    pub fn classify(&self, report: &CalibrationReport) -> CalibrationStatus {
        report.classify(self.tolerance)
    }
}

impl Default for CalibrationService {
    fn default() -> Self {
        Self::new(Tolerance::default())
    }
}
