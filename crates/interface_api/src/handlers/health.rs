//! Health handlers

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

/// Liveness probe
pub async fn health_check() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::ok(json!({
        "service": "export-docs-core",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness probe; verifies the database answers
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(ApiResponse::ok(json!({ "database": "ready" }))))
}
