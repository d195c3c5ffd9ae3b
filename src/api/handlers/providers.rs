//! Provider handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::stations::apply_filter;
use super::ApiState;
use crate::api::dto::{
    ApiResponse, CreateProviderRequest, ProviderResponse, StationFilter, StationResponse,
};
use crate::api::error::{domain_error, ApiError, ApiResult};
use crate::api::extract::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/providers",
    tag = "Providers",
    responses(
        (status = 200, description = "All providers", body = ApiResponse<Vec<ProviderResponse>>)
    )
)]
pub async fn list_providers(State(state): State<ApiState>) -> ApiResult<Vec<ProviderResponse>> {
    let providers = state.ctx.provider_service.list().map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        providers.into_iter().map(ProviderResponse::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/providers",
    tag = "Providers",
    request_body = CreateProviderRequest,
    responses(
        (status = 201, description = "Provider created", body = ApiResponse<ProviderResponse>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_provider(
    State(state): State<ApiState>,
    ValidatedJson(request): ValidatedJson<CreateProviderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProviderResponse>>), ApiError> {
    let provider = state
        .ctx
        .provider_service
        .create(request.into())
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ProviderResponse::from(provider))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/providers/{id}",
    tag = "Providers",
    params(("id" = i32, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Provider details", body = ApiResponse<ProviderResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_provider(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
) -> ApiResult<ProviderResponse> {
    let provider = state.ctx.provider_service.get(id).map_err(domain_error)?;
    Ok(Json(ApiResponse::success(ProviderResponse::from(provider))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/providers/{id}",
    tag = "Providers",
    params(("id" = i32, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Provider deleted"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Provider still owns stations")
    )
)]
pub async fn delete_provider(State(state): State<ApiState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.ctx.provider_service.delete(id).map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}

/// Stations of one provider, in the provider's list order
#[utoipa::path(
    get,
    path = "/api/v1/providers/{id}/stations",
    tag = "Providers",
    params(("id" = i32, Path, description = "Provider ID"), StationFilter),
    responses(
        (status = 200, description = "Matching stations", body = ApiResponse<Vec<StationResponse>>),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn list_provider_stations(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
    Query(filter): Query<StationFilter>,
) -> ApiResult<Vec<StationResponse>> {
    let queries = &state.ctx.queries;
    let stations = match (&filter.region, filter.min_power_kw) {
        (Some(region), _) => queries.in_region(id, region),
        (None, Some(min_kw)) => queries.min_power(id, min_kw),
        (None, None) if is_available_filter(&filter) => queries.available(id),
        (None, None) => state.ctx.station_service.list_by_provider(id),
    }
    .map_err(domain_error)?;

    let stations = apply_filter(stations, &filter).map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        stations.into_iter().map(StationResponse::from).collect(),
    )))
}

fn is_available_filter(filter: &StationFilter) -> bool {
    filter
        .status
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("available"))
}

#[utoipa::path(
    put,
    path = "/api/v1/providers/{id}/stations/{station_id}",
    tag = "Providers",
    params(
        ("id" = i32, Path, description = "Provider ID"),
        ("station_id" = i32, Path, description = "Station ID")
    ),
    responses(
        (status = 200, description = "Station attached"),
        (status = 404, description = "Provider or station not found")
    )
)]
pub async fn attach_station(
    State(state): State<ApiState>,
    Path((id, station_id)): Path<(i32, i32)>,
) -> ApiResult<()> {
    state
        .ctx
        .provider_service
        .attach_station(id, station_id)
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/providers/{id}/stations/{station_id}",
    tag = "Providers",
    params(
        ("id" = i32, Path, description = "Provider ID"),
        ("station_id" = i32, Path, description = "Station ID")
    ),
    responses(
        (status = 200, description = "Station detached"),
        (status = 404, description = "Provider or station not found")
    )
)]
pub async fn detach_station(
    State(state): State<ApiState>,
    Path((id, station_id)): Path<(i32, i32)>,
) -> ApiResult<()> {
    state
        .ctx
        .provider_service
        .detach_station(id, station_id)
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}
