//! Health check endpoint

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::ApiState;

/// Liveness report
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests
    pub status: String,
    /// Crate version
    pub version: String,
    /// Whether inquiries are persisted or only logged
    pub datastore: bool,
    /// RFC 3339 time of the check
    pub timestamp: String,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".into(),
        version: state.version.clone(),
        datastore: state.store.is_some(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
