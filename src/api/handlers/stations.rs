//! Station handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::ApiState;
use crate::api::dto::{
    ApiResponse, CreateStationRequest, StationFilter, StationResponse, UpdateStatusRequest,
};
use crate::api::error::{domain_error, ApiError, ApiResult};
use crate::api::extract::ValidatedJson;
use crate::domain::{DomainResult, Station, StationStatus};

/// Keep the stations matching every filter that is set.
pub(crate) fn apply_filter(stations: Vec<Station>, filter: &StationFilter) -> DomainResult<Vec<Station>> {
    let status: Option<StationStatus> = filter
        .status
        .as_deref()
        .map(|s| s.parse::<StationStatus>())
        .transpose()?;
    let region = filter.region.as_deref().map(str::to_lowercase);

    Ok(stations
        .into_iter()
        .filter(|s| filter.provider_id.map_or(true, |p| s.provider_id == Some(p)))
        .filter(|s| status.map_or(true, |st| s.status == st))
        .filter(|s| filter.min_power_kw.map_or(true, |kw| s.max_power_kw >= kw))
        .filter(|s| {
            region
                .as_deref()
                .map_or(true, |r| s.location.to_lowercase().contains(r))
        })
        .collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/stations",
    tag = "Stations",
    params(StationFilter),
    responses(
        (status = 200, description = "Matching stations", body = ApiResponse<Vec<StationResponse>>),
        (status = 422, description = "Unknown status filter")
    )
)]
pub async fn list_stations(
    State(state): State<ApiState>,
    Query(filter): Query<StationFilter>,
) -> ApiResult<Vec<StationResponse>> {
    let stations = state.ctx.station_service.list().map_err(domain_error)?;
    let stations = apply_filter(stations, &filter).map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        stations.into_iter().map(StationResponse::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/stations",
    tag = "Stations",
    request_body = CreateStationRequest,
    responses(
        (status = 201, description = "Station created", body = ApiResponse<StationResponse>),
        (status = 404, description = "Provider not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_station(
    State(state): State<ApiState>,
    ValidatedJson(request): ValidatedJson<CreateStationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StationResponse>>), ApiError> {
    let dto = request.into_dto().map_err(domain_error)?;
    let station = state.ctx.station_service.create(dto).map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(StationResponse::from(station))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/stations/{id}",
    tag = "Stations",
    params(("id" = i32, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station details", body = ApiResponse<StationResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_station(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
) -> ApiResult<StationResponse> {
    let station = state.ctx.station_service.get(id).map_err(domain_error)?;
    Ok(Json(ApiResponse::success(StationResponse::from(station))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/stations/{id}",
    tag = "Stations",
    params(("id" = i32, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_station(State(state): State<ApiState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.ctx.station_service.delete(id).map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}

/// Set the status directly. Observers are notified even when the status
/// does not change.
#[utoipa::path(
    put,
    path = "/api/v1/stations/{id}/status",
    tag = "Stations",
    params(("id" = i32, Path, description = "Station ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated station", body = ApiResponse<StationResponse>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Unknown status")
    )
)]
pub async fn update_station_status(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<StationResponse> {
    let status: StationStatus = request.status.parse().map_err(domain_error)?;
    let station = state
        .ctx
        .station_service
        .update_status(id, status)
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(StationResponse::from(station))))
}
