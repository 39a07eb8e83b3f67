// HTTP request handlers
use crate::domain::error::ParseResult;
use crate::presentation::app_state::AppState;
use crate::presentation::session::FormUpdate;
use crate::presentation::view::SessionView;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

type ActionResponse = (StatusCode, Json<SessionView>);

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current form, report and offset log
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(session.view(state.calibration_service.tolerance()))
}

/// Apply typed field values without triggering any action
pub async fn update_form(
    State(state): State<Arc<AppState>>,
    Json(update): Json<FormUpdate>,
) -> Json<SessionView> {
    let mut session = state.session.lock().await;
    session.update_form(update);
    Json(session.view(state.calibration_service.tolerance()))
}

/// Compare the manometer reading against the device reading
pub async fn calculate(State(state): State<Arc<AppState>>) -> ActionResponse {
    let mut session = state.session.lock().await;
    let result = session.calculate(&state.calibration_service);
    respond(result, session.view(state.calibration_service.tolerance()))
}

/// Append an offset adjustment to the head of the log
pub async fn record_offset(State(state): State<Arc<AppState>>) -> ActionResponse {
    let mut session = state.session.lock().await;
    let result = session.record_offset(&state.offset_log_service);
    respond(result, session.view(state.calibration_service.tolerance()))
}

/// Clear the form, report and the entire log
pub async fn reset(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    let mut session = state.session.lock().await;
    let cleared = session.log().len();
    session.reset();
    tracing::info!("Session reset, {} offset entries cleared", cleared);
    Json(session.view(state.calibration_service.tolerance()))
}

fn respond(result: ParseResult<()>, view: SessionView) -> ActionResponse {
    // The message travels in the view so the screen can show it
    let status = match result {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, Json(view))
}
