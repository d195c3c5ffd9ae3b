//! Charging session DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{ChargingOutcome, StopOutcome};
use crate::shared::validations::validate_non_negative_decimal;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StartChargingRequest {
    pub user_id: i32,
    pub station_id: i32,
    /// Debited up front when the session starts
    #[validate(custom(function = "validate_non_negative_decimal"))]
    #[schema(value_type = String, example = "20.00")]
    pub estimated_cost: Decimal,
}

/// Result of a start or stop request.
///
/// A turned-down request is still a successful API call: `started` is
/// `false` and `reason` carries the machine-readable cause
/// (`unavailable`, `insufficient_balance`, `incompatible`).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChargingResponse {
    pub station_id: i32,
    pub started: bool,
    pub reason: Option<String>,
    pub message: String,
}

impl ChargingResponse {
    pub fn from_outcome(station_id: i32, outcome: &ChargingOutcome) -> Self {
        match outcome {
            ChargingOutcome::Started => Self {
                station_id,
                started: true,
                reason: None,
                message: "Charging started".to_string(),
            },
            ChargingOutcome::Rejected(rejection) => Self {
                station_id,
                started: false,
                reason: Some(rejection.code().to_string()),
                message: rejection.to_string(),
            },
            // Resolved to 404 by the handler before reaching here
            ChargingOutcome::UserNotFound(id) => Self {
                station_id,
                started: false,
                reason: Some("user_not_found".to_string()),
                message: format!("user {} not found", id),
            },
            ChargingOutcome::StationNotFound(id) => Self {
                station_id,
                started: false,
                reason: Some("station_not_found".to_string()),
                message: format!("station {} not found", id),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StopChargingResponse {
    pub station_id: i32,
    pub stopped: bool,
    /// Station status when there was no session to end
    pub status: Option<String>,
}

impl StopChargingResponse {
    pub fn from_outcome(station_id: i32, outcome: &StopOutcome) -> Self {
        match outcome {
            StopOutcome::Stopped => Self {
                station_id,
                stopped: true,
                status: None,
            },
            StopOutcome::NotOccupied(status) => Self {
                station_id,
                stopped: false,
                status: Some(status.to_string()),
            },
            StopOutcome::StationNotFound(_) => Self {
                station_id,
                stopped: false,
                status: None,
            },
        }
    }
}
