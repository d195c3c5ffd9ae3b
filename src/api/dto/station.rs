//! Station DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreateStationDto, DomainResult, Station, StationStatus};
use crate::shared::validations::{validate_not_blank, validate_power_kw};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StationResponse {
    pub id: i32,
    pub name: String,
    pub location: String,
    /// `"lat,lon"`
    pub coordinates: String,
    /// `Available`, `Occupied`, `OutOfService` or `Maintenance`
    pub status: String,
    pub provider_id: Option<i32>,
    pub connectors: u32,
    pub max_power_kw: f64,
}

impl From<Station> for StationResponse {
    fn from(station: Station) -> Self {
        Self {
            id: station.id,
            name: station.name,
            location: station.location,
            coordinates: station.coordinates,
            status: station.status.to_string(),
            provider_id: station.provider_id,
            connectors: station.connectors,
            max_power_kw: station.max_power_kw,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStationRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub coordinates: String,
    /// Defaults to `Available`
    pub status: Option<String>,
    pub provider_id: Option<i32>,
    #[serde(default)]
    pub connectors: u32,
    #[validate(custom(function = "validate_power_kw"))]
    pub max_power_kw: f64,
}

impl CreateStationRequest {
    pub fn into_dto(self) -> DomainResult<CreateStationDto> {
        let status = match self.status.as_deref() {
            Some(raw) => raw.parse()?,
            None => StationStatus::default(),
        };
        Ok(CreateStationDto {
            name: self.name,
            location: self.location,
            coordinates: self.coordinates,
            status,
            provider_id: self.provider_id,
            connectors: self.connectors,
            max_power_kw: self.max_power_kw,
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub status: String,
}
