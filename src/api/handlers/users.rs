//! User management handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::ApiState;
use crate::api::dto::{ApiResponse, BalanceResponse, CreateUserRequest, FundsRequest, UserResponse};
use crate::api::error::{domain_error, ApiError, ApiResult};
use crate::api::extract::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = ApiResponse<Vec<UserResponse>>)
    )
)]
pub async fn list_users(State(state): State<ApiState>) -> ApiResult<Vec<UserResponse>> {
    let users = state.ctx.user_service.list().map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<UserResponse>),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<ApiState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let dto = request.into_dto().map_err(domain_error)?;
    let user = state.ctx.user_service.register(dto).map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserResponse::from(user))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(State(state): State<ApiState>, Path(id): Path<i32>) -> ApiResult<UserResponse> {
    let user = state.ctx.user_service.get(id).map_err(domain_error)?;
    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(State(state): State<ApiState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.ctx.user_service.delete(id).map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/funds",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = FundsRequest,
    responses(
        (status = 200, description = "New balance", body = ApiResponse<BalanceResponse>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Negative amount")
    )
)]
pub async fn add_funds(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<FundsRequest>,
) -> ApiResult<BalanceResponse> {
    let balance = state
        .ctx
        .user_service
        .add_funds(id, request.amount)
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(BalanceResponse {
        user_id: id,
        balance,
    })))
}
