//! Common API DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response envelope.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Payload, `null` on failure
    pub data: Option<T>,
    /// Error description, omitted on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Filters for station listings
#[derive(Debug, Default, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct StationFilter {
    /// Only stations owned by this provider
    pub provider_id: Option<i32>,
    /// Only stations with this status (`Available`, `Occupied`, ...)
    pub status: Option<String>,
    /// Only stations delivering at least this many kW
    pub min_power_kw: Option<f64>,
    /// Case-insensitive substring of the location
    pub region: Option<String>,
}
