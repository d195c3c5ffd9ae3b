//! Charging session handlers

use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiState;
use crate::api::dto::{ApiResponse, ChargingResponse, StartChargingRequest, StopChargingResponse};
use crate::api::error::{domain_error, not_found, ApiResult};
use crate::api::extract::ValidatedJson;
use crate::application::{ChargingOutcome, StopOutcome};

/// Run a request through the admission chain. A rejection is a normal
/// `200` answer with `started: false`.
#[utoipa::path(
    post,
    path = "/api/v1/charging/start",
    tag = "Charging",
    request_body = StartChargingRequest,
    responses(
        (status = 200, description = "Started or rejected", body = ApiResponse<ChargingResponse>),
        (status = 404, description = "User or station not found"),
        (status = 422, description = "Negative cost")
    )
)]
pub async fn start_charging(
    State(state): State<ApiState>,
    ValidatedJson(request): ValidatedJson<StartChargingRequest>,
) -> ApiResult<ChargingResponse> {
    let outcome = state
        .ctx
        .processor
        .request_charging(request.user_id, request.station_id, request.estimated_cost)
        .map_err(domain_error)?;

    match outcome {
        ChargingOutcome::UserNotFound(id) => Err(not_found(format!("User {} not found", id))),
        ChargingOutcome::StationNotFound(id) => {
            Err(not_found(format!("Station {} not found", id)))
        }
        outcome => Ok(Json(ApiResponse::success(ChargingResponse::from_outcome(
            request.station_id,
            &outcome,
        )))),
    }
}

/// End the session on a station. Stopping a station with no session is
/// not an error: `stopped` is `false` and `status` says why.
#[utoipa::path(
    post,
    path = "/api/v1/charging/stop/{station_id}",
    tag = "Charging",
    params(("station_id" = i32, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Stop result", body = ApiResponse<StopChargingResponse>),
        (status = 404, description = "Station not found")
    )
)]
pub async fn stop_charging(
    State(state): State<ApiState>,
    Path(station_id): Path<i32>,
) -> ApiResult<StopChargingResponse> {
    let outcome = state
        .ctx
        .processor
        .end_session(station_id)
        .map_err(domain_error)?;

    match outcome {
        StopOutcome::StationNotFound(id) => Err(not_found(format!("Station {} not found", id))),
        outcome => Ok(Json(ApiResponse::success(StopChargingResponse::from_outcome(
            station_id, &outcome,
        )))),
    }
}
