//! Health check endpoint

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApiState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when the stores answer
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub stations: usize,
    pub occupied_stations: usize,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    let (status, stations, occupied) = match state.ctx.station_service.list() {
        Ok(all) => {
            let occupied = all.iter().filter(|s| s.is_occupied()).count();
            ("ok", all.len(), occupied)
        }
        Err(_) => ("degraded", 0, 0),
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        stations,
        occupied_stations: occupied,
    })
}
