//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Store reachable
/// - **503 Service Unavailable**: Store ping failed
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let healthy = db_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database: db_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.link_service.health_check().await {
        Ok(()) => CheckStatus {
            status: "ok".to_string(),
            message: Some("Connected".to_string()),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Database error: {}", e)),
        },
    }
}
