//! Health check handlers.

use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,
    /// Per-dependency status, keyed by probe name
    pub services: BTreeMap<String, ServiceHealth>,
}

/// Status of one dependency. Failure causes are logged, never returned.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceHealth {
    pub status: String,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check endpoint - verifies the database and the session store.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "All dependencies reachable", body = HealthResponse),
        (status = 503, description = "At least one dependency is down", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let mut services = BTreeMap::new();

    for probe in state.probes.iter() {
        let status = match probe.check().await {
            Ok(()) => "healthy",
            Err(e) => {
                tracing::warn!("Health probe {} failed: {}", probe.name(), e);
                "unhealthy"
            }
        };
        services.insert(
            probe.name().to_string(),
            ServiceHealth {
                status: status.to_string(),
            },
        );
    }

    let all_healthy = services.values().all(|s| s.status == "healthy");

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        services,
    };

    if all_healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
