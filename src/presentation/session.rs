// Calibration session - The screen's mutable state and its three actions
use crate::application::calibration_service::CalibrationService;
use crate::application::offset_log_service::OffsetLogService;
use crate::domain::calibration::{CalibrationReport, Tolerance};
use crate::domain::error::{ParseError, ParseResult};
use crate::domain::offset_log::OffsetLog;
use crate::presentation::view::{CalibrationView, FormView, OffsetEntryView, SessionView};
use serde::Deserialize;

/// Raw text of the five input fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub reference_mmh2o: String,
    pub device_kpa: String,
    pub device_id: String,
    pub previous_offset: String,
    pub new_offset: String,
}

/// Partial edit of the form; absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormUpdate {
    pub reference_mmh2o: Option<String>,
    pub device_kpa: Option<String>,
    pub device_id: Option<String>,
    pub previous_offset: Option<String>,
    pub new_offset: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CalibrationSession {
    form: FormState,
    report: Option<CalibrationReport>,
    error: Option<ParseError>,
    log: OffsetLog,
}

impl CalibrationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn report(&self) -> Option<&CalibrationReport> {
        self.report.as_ref()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    pub fn log(&self) -> &OffsetLog {
        &self.log
    }

    pub fn update_form(&mut self, update: FormUpdate) {
        let FormUpdate {
            reference_mmh2o,
            device_kpa,
            device_id,
            previous_offset,
            new_offset,
        } = update;

        let fields = [
            (reference_mmh2o, &mut self.form.reference_mmh2o),
            (device_kpa, &mut self.form.device_kpa),
            (device_id, &mut self.form.device_id),
            (previous_offset, &mut self.form.previous_offset),
            (new_offset, &mut self.form.new_offset),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }

    /// On failure the previous report is cleared and the typed fields stay.
    pub fn calculate(&mut self, service: &CalibrationService) -> ParseResult<()> {
        self.error = None;

        match service.compute_calibration(&self.form.reference_mmh2o, &self.form.device_kpa) {
            Ok(report) => {
                self.report = Some(report);
                Ok(())
            }
            Err(e) => {
                self.report = None;
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// On success the three offset fields are cleared. On failure the log and
    /// the fields are left as they were.
    pub fn record_offset(&mut self, service: &OffsetLogService) -> ParseResult<()> {
        self.error = None;

        let result = service.record_offset_adjustment(
            &self.form.device_id,
            &self.form.previous_offset,
            &self.form.new_offset,
            &self.log,
        );

        match result {
            Ok((_, log)) => {
                self.log = log;
                self.form.device_id.clear();
                self.form.previous_offset.clear();
                self.form.new_offset.clear();
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Clears every field, the report, the message and the whole log.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn view(&self, tolerance: Tolerance) -> SessionView {
        SessionView {
            form: FormView {
                reference_mmh2o: self.form.reference_mmh2o.clone(),
                device_kpa: self.form.device_kpa.clone(),
                device_id: self.form.device_id.clone(),
                previous_offset: self.form.previous_offset.clone(),
                new_offset: self.form.new_offset.clone(),
            },
            calibration: self
                .report
                .as_ref()
                .map(|report| CalibrationView::render(report, tolerance)),
            error_message: self.error.as_ref().map(|e| e.to_string()),
            offset_log: self.log.entries().map(OffsetEntryView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::clock::FixedClock;
    use crate::domain::offset_log::DEVICE_ID_PLACEHOLDER;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn offset_service() -> OffsetLogService {
        let now = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 15, 30)
            .unwrap();
        OffsetLogService::new(Arc::new(FixedClock(now)))
    }

    fn fill(session: &mut CalibrationSession, reference: &str, device: &str) {
        session.update_form(FormUpdate {
            reference_mmh2o: Some(reference.to_string()),
            device_kpa: Some(device.to_string()),
            ..Default::default()
        });
    }

    fn fill_offsets(session: &mut CalibrationSession, id: &str, previous: &str, new: &str) {
        session.update_form(FormUpdate {
            device_id: Some(id.to_string()),
            previous_offset: Some(previous.to_string()),
            new_offset: Some(new.to_string()),
            ..Default::default()
        });
    }

    #[test]
    fn test_update_form_only_touches_given_fields() {
        let mut session = CalibrationSession::new();
        fill(&mut session, "200", "2.0");
        session.update_form(FormUpdate {
            device_kpa: Some("2.1".to_string()),
            ..Default::default()
        });

        assert_eq!(session.form().reference_mmh2o, "200");
        assert_eq!(session.form().device_kpa, "2.1");
        assert_eq!(session.form().device_id, "");
    }

    #[test]
    fn test_failed_calculate_clears_previous_report() {
        let service = CalibrationService::default();
        let mut session = CalibrationSession::new();

        fill(&mut session, "200", "2.0");
        assert!(session.calculate(&service).is_ok());
        assert!(session.report().is_some());

        fill(&mut session, "abc", "2.0");
        assert_eq!(session.calculate(&service), Err(ParseError::Pressure));
        assert!(session.report().is_none());
        assert_eq!(session.error(), Some(&ParseError::Pressure));
        assert_eq!(session.form().reference_mmh2o, "abc");
    }

    #[test]
    fn test_next_action_clears_error_message() {
        let service = CalibrationService::default();
        let mut session = CalibrationSession::new();

        assert!(session.calculate(&service).is_err());
        fill(&mut session, "100", "1");
        assert!(session.calculate(&service).is_ok());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_record_offset_clears_offset_fields() {
        let service = offset_service();
        let mut session = CalibrationSession::new();
        fill(&mut session, "200", "2.0");
        fill_offsets(&mut session, "  0042 ", "0.50", "0.80");

        assert!(session.record_offset(&service).is_ok());

        assert_eq!(session.log().len(), 1);
        assert_eq!(session.log().latest().map(|e| e.device_id()), Some("0042"));
        assert_eq!(session.form().device_id, "");
        assert_eq!(session.form().previous_offset, "");
        assert_eq!(session.form().new_offset, "");
        // Pressure fields are not part of the offset form
        assert_eq!(session.form().reference_mmh2o, "200");
    }

    #[test]
    fn test_failed_record_keeps_log_and_fields() {
        let service = offset_service();
        let mut session = CalibrationSession::new();
        fill_offsets(&mut session, "", "0.50", "0.80");
        session.record_offset(&service).unwrap();
        let before = session.log().clone();

        fill_offsets(&mut session, "P-1", "0.8", "oops");
        assert_eq!(session.record_offset(&service), Err(ParseError::Offset));

        assert_eq!(session.log(), &before);
        assert_eq!(session.form().new_offset, "oops");
        assert_eq!(session.log().latest().map(|e| e.device_id()), Some(DEVICE_ID_PLACEHOLDER));
    }

    #[test]
    fn test_calculate_does_not_touch_log() {
        let mut session = CalibrationSession::new();
        fill_offsets(&mut session, "1", "0", "1");
        session.record_offset(&offset_service()).unwrap();

        fill(&mut session, "200", "2.0");
        session.calculate(&CalibrationService::default()).unwrap();
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = CalibrationSession::new();
        fill(&mut session, "200", "2.0");
        session.calculate(&CalibrationService::default()).unwrap();
        fill_offsets(&mut session, "1", "0", "1");
        session.record_offset(&offset_service()).unwrap();
        fill_offsets(&mut session, "2", "x", "1");
        let _ = session.record_offset(&offset_service());

        session.reset();

        assert_eq!(session.form(), &FormState::default());
        assert!(session.report().is_none());
        assert!(session.error().is_none());
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_view_renders_log_newest_first() {
        let service = offset_service();
        let mut session = CalibrationSession::new();
        for (id, previous, new) in [("a", "0", "0.1"), ("b", "0.1", "0.2")] {
            fill_offsets(&mut session, id, previous, new);
            session.record_offset(&service).unwrap();
        }

        let view = session.view(Tolerance::default());
        let ids: Vec<&str> = view.offset_log.iter().map(|e| e.device_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(view.offset_log[0].recorded_at, "2025-06-01 08:15");
        assert!(view.calibration.is_none());
    }

    #[test]
    fn test_view_classifies_with_given_tolerance() {
        let mut session = CalibrationSession::new();
        fill(&mut session, "200", "2.0");
        session.calculate(&CalibrationService::default()).unwrap();

        let strict = session.view(Tolerance::new(0.01).unwrap());
        let calibration = strict.calibration.unwrap();
        assert_eq!(calibration.status_label, "Correction needed");
        assert_eq!(calibration.tolerance, "±0.01 kPa");
    }
}
