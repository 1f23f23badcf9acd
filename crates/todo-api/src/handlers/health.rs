//! Health check handlers
//!
//! Endpoints for liveness and readiness checks.

use axum::{extract::State, http::StatusCode, Json};
use todo_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Basic health check (liveness)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check
///
/// GET /health/ready
///
/// Ready when the session store answers within the store timeout, since
/// every token route depends on it.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();
    let timeout = ctx.auth_settings().store_timeout;

    let session_store_healthy = match tokio::time::timeout(timeout, ctx.session_repo().ping()).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Session store ping failed");
            false
        }
        Err(_) => {
            tracing::warn!(timeout_ms = timeout.as_millis(), "Session store ping timed out");
            false
        }
    };

    let response = ReadinessResponse::ready(session_store_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
