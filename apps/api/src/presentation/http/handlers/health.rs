use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

pub const READY_MESSAGE: &str = "Backend Server is ready for Image Classification!";

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    classifier: &'static str,
    version: &'static str,
    checked_at: chrono::DateTime<chrono::Utc>,
}

pub async fn ready() -> &'static str {
    READY_MESSAGE
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let classifier_status = if state.config.classifier_configured() {
        "configured"
    } else {
        tracing::warn!("Health check: Custom Vision credentials are not configured");
        "unconfigured"
    };

    let status = if classifier_status == "configured" {
        "healthy"
    } else {
        "degraded"
    };

    let response = HealthResponse {
        status,
        classifier: classifier_status,
        version: env!("CARGO_PKG_VERSION"),
        checked_at: chrono::Utc::now(),
    };

    let code = if status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}
