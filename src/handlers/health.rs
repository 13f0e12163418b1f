// handlers/health.rs - GET /health handler

use axum::extract::State;
use serde::Serialize;

use crate::api::{ApiResponse, ApiResult};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub uptime_secs: u64,
    pub storage: &'static str,
    pub students: usize,
}

pub async fn get(State(state): State<AppState>) -> ApiResult<HealthBody> {
    match state.roster.snapshot().await {
        Ok(roster) => Ok(ApiResponse::success(HealthBody {
            status: "ok",
            timestamp: chrono::Utc::now(),
            uptime_secs: state.started_at.elapsed().as_secs(),
            storage: "ok",
            students: roster.len(),
        })),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            Err(ApiError::service_unavailable("student records unavailable"))
        }
    }
}
