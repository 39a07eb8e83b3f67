// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};
use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use manometer_calibration::application::calibration_service::CalibrationService;
use manometer_calibration::application::offset_log_service::OffsetLogService;
use manometer_calibration::infrastructure::config::load_app_config;
use manometer_calibration::infrastructure::system_clock::SystemClock;
use manometer_calibration::presentation::app_state::AppState;
use manometer_calibration::presentation::handlers::{
    calculate, get_session, health_check, record_offset, reset, update_form,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_app_config()?;

    // Initialize tracing, RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let tolerance = config.calibration.tolerance()?;

    // Create services (application layer)
    let calibration_service = CalibrationService::new(tolerance);
    let offset_log_service = OffsetLogService::new(Arc::new(SystemClock));

    let state = Arc::new(AppState::new(calibration_service, offset_log_service));

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/session", get(get_session))
        .route("/session/form", patch(update_form))
        .route("/session/calculate", post(calculate))
        .route("/session/offsets", post(record_offset))
        .route("/session/reset", post(reset))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind_addr.parse()?;
    tracing::info!(
        "Starting manometer-calibration service on {} (tolerance ±{} kPa)",
        addr,
        tolerance.kpa()
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
