// Application state for HTTP handlers
use crate::application::calibration_service::CalibrationService;
use crate::application::offset_log_service::OffsetLogService;
use crate::presentation::session::CalibrationSession;
use tokio::sync::Mutex;

/// The single on-screen session. Each action locks it for its whole run.
pub struct AppState {
    pub calibration_service: CalibrationService,
    pub offset_log_service: OffsetLogService,
    pub session: Mutex<CalibrationSession>,
}

impl AppState {
    pub fn new(calibration_service: CalibrationService, offset_log_service: OffsetLogService) -> Self {
        Self {
            calibration_service,
            offset_log_service,
            session: Mutex::new(CalibrationSession::new()),
        }
    }
}
