// View models rendered by the calibration screen
use crate::domain::calibration::{CalibrationReport, CalibrationStatus, Tolerance};
use crate::domain::offset_log::OffsetLogEntry;
use crate::domain::pressure::CONVERSION_NOTE;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusView {
    Good,
    NeedsCorrection,
}

impl From<CalibrationStatus> for StatusView {
    fn from(status: CalibrationStatus) -> Self {
        match status {
            CalibrationStatus::Good => StatusView::Good,
            CalibrationStatus::NeedsCorrection => StatusView::NeedsCorrection,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationView {
    pub status: StatusView,
    pub status_label: String,
    pub tolerance: String,
    pub reference_pressure_kpa: String,
    pub error_kpa: String,
    pub absolute_error_kpa: String,
    pub relative_error_percent: String,
    pub conversion_note: String,
}

impl CalibrationView {
    /// Classification is taken from `tolerance` at render time.
    pub fn render(report: &CalibrationReport, tolerance: Tolerance) -> Self {
        let status = report.classify(tolerance);
        Self {
            status: status.into(),
            status_label: status.label().to_string(),
            tolerance: format!("±{} kPa", tolerance_digits(tolerance.kpa())),
            reference_pressure_kpa: format!("{:.3} kPa", report.reference_pressure_kpa),
            error_kpa: format!("{:.3} kPa", report.error_kpa),
            absolute_error_kpa: format!("{:.3} kPa", report.absolute_error_kpa),
            relative_error_percent: format!("{:.2} %", report.relative_error_percent),
            conversion_note: CONVERSION_NOTE.to_string(),
        }
    }
}

/// Shortest exact form of the threshold, with at least one decimal.
fn tolerance_digits(kpa: f64) -> String {
    if kpa.fract() == 0.0 {
        format!("{:.1}", kpa)
    } else {
        kpa.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetEntryView {
    pub id: String,
    pub device_id: String,
    pub previous_offset_kpa: String,
    pub new_offset_kpa: String,
    pub delta_kpa: String,
    pub recorded_at: String,
}

impl From<&OffsetLogEntry> for OffsetEntryView {
    fn from(entry: &OffsetLogEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            device_id: entry.device_id().to_string(),
            previous_offset_kpa: format!("{:.3} kPa", entry.previous_offset_kpa()),
            new_offset_kpa: format!("{:.3} kPa", entry.new_offset_kpa()),
            delta_kpa: format!("{} kPa", signed_delta(entry.delta_kpa())),
            recorded_at: entry.recorded_at().to_string(),
        }
    }
}

/// `+0.300`, `-0.250`; zero is shown with a plus sign.
fn signed_delta(delta: f64) -> String {
    if delta >= 0.0 {
        // abs() folds -0.0 into +0.0
        format!("+{:.3}", delta.abs())
    } else {
        format!("{:.3}", delta)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub reference_mmh2o: String,
    pub device_kpa: String,
    pub device_id: String,
    pub previous_offset: String,
    pub new_offset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub form: FormView,
    pub calibration: Option<CalibrationView>,
    pub error_message: Option<String>,
    pub offset_log: Vec<OffsetEntryView>,
}
