// Calibration report domain model
use super::pressure::PressureReading;

/// Error figures for one reference-versus-device comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationReport {
    pub reference_mmh2o: f64,
    pub device_reading_kpa: f64,
    pub reference_pressure_kpa: f64,
    /// Reference minus device
    pub error_kpa: f64,
    pub absolute_error_kpa: f64,
    pub relative_error_percent: f64,
}

impl CalibrationReport {
    pub fn from_readings(reference: PressureReading, device: PressureReading) -> Self {
        let reference_pressure_kpa = reference.to_kpa();
        let device_reading_kpa = device.to_kpa();
        let error_kpa = reference_pressure_kpa - device_reading_kpa;

        // A zero reference reports 0 % rather than dividing by zero
        let relative_error_percent = if reference_pressure_kpa != 0.0 {
            (error_kpa / reference_pressure_kpa) * 100.0
        } else {
            0.0
        };

        Self {
            reference_mmh2o: reference.value,
            device_reading_kpa,
            reference_pressure_kpa,
            error_kpa,
            absolute_error_kpa: error_kpa.abs(),
            relative_error_percent,
        }
    }

    /// False when a figure overflowed, e.g. readings near `f64::MAX` of opposite sign.
    pub fn is_finite(&self) -> bool {
        self.reference_pressure_kpa.is_finite()
            && self.error_kpa.is_finite()
            && self.relative_error_percent.is_finite()
    }

    pub fn classify(&self, tolerance: Tolerance) -> CalibrationStatus {
        if self.absolute_error_kpa <= tolerance.kpa() {
            CalibrationStatus::Good
        } else {
            CalibrationStatus::NeedsCorrection
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationStatus {
    Good,
    NeedsCorrection,
}

impl CalibrationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CalibrationStatus::Good => "Error acceptable",
            CalibrationStatus::NeedsCorrection => "Correction needed",
        }
    }
}

/// Largest absolute error, in kPa, still accepted as a good calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance(f64);

impl Tolerance {
    pub const DEFAULT_KPA: f64 = 0.5;

    /// Returns `None` for negative or non-finite thresholds.
    pub fn new(kpa: f64) -> Option<Self> {
        (kpa.is_finite() && kpa >= 0.0).then_some(Self(kpa))
    }

    pub fn kpa(&self) -> f64 {
        self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(Self::DEFAULT_KPA)
    }
}
