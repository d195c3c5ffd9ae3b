//! Mapping from domain errors to HTTP responses

use axum::http::StatusCode;
use axum::Json;

use super::dto::ApiResponse;
use crate::domain::DomainError;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Conflict(_) | DomainError::InUse(_) => StatusCode::CONFLICT,
        DomainError::Observer { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn domain_error(error: DomainError) -> ApiError {
    let status = status_for(&error);
    if status.is_server_error() {
        tracing::error!(error = %error, "Request failed");
    }
    (status, Json(ApiResponse::error(error.to_string())))
}

pub fn not_found(message: impl Into<String>) -> ApiError {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        assert_eq!(
            status_for(&DomainError::not_found("User", "id", 7)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DomainError::validation("bad")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&DomainError::Conflict("dup".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DomainError::InUse("busy".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DomainError::Observer {
                observer: "display",
                message: "gone".into()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_body_carries_the_message() {
        let (status, Json(body)) = domain_error(DomainError::validation("amount must be positive"));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("Validation: amount must be positive"));
    }
}
