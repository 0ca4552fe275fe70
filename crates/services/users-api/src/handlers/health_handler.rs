//! Health check handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

const HEALTHY: &str = "healthy";

/// Health check response.
///
/// The HTTP status is always 200; component health is reported in the body.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthReport {
    /// Service status
    #[schema(example = "healthy")]
    pub status: String,
    /// Persistence store status: `healthy` or `unhealthy: <reason>`
    #[schema(example = "healthy")]
    pub database: String,
    /// Cache store status: `healthy` or `unhealthy: <reason>`
    #[schema(example = "unhealthy: Connection refused")]
    pub redis: String,
    /// Time of the check (UTC)
    pub timestamp: DateTime<Utc>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - probes the database and Redis independently.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Component health", body = HealthReport)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    let (database, redis) = tokio::join!(state.users.ping(), state.cache.ping());

    Json(HealthReport {
        status: HEALTHY.to_string(),
        database: describe(database),
        redis: describe(redis),
        timestamp: Utc::now(),
    })
}

fn describe<E: std::fmt::Display>(probe: Result<(), E>) -> String {
    match probe {
        Ok(()) => HEALTHY.to_string(),
        Err(e) => {
            tracing::warn!("Health probe failed: {}", e);
            format!("unhealthy: {}", e)
        }
    }
}
