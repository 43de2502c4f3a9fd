//! Health check handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use examhall_core::error::AppError;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match &state.database {
        Some(pool) => database_status(pool.ping().await),
        None => "unused",
    };

    let status = if database == "unreachable" { "degraded" } else { "ok" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.config.storage.backend.to_string(),
        database: database.to_string(),
    })
}

fn database_status(ping: Result<(), AppError>) -> &'static str {
    match ping {
        Ok(()) => "connected",
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            "unreachable"
        }
    }
}
