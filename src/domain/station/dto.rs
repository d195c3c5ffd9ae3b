use validator::Validate;

use super::model::{Station, StationStatus};
use crate::shared::validations::{validate_not_blank, validate_power_kw};

#[derive(Debug, Clone, Validate)]
pub struct CreateStationDto {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    pub location: String,
    pub coordinates: String,
    pub status: StationStatus,
    pub provider_id: Option<i32>,
    pub connectors: u32,
    #[validate(custom(function = "validate_power_kw"))]
    pub max_power_kw: f64,
}

impl From<CreateStationDto> for Station {
    fn from(dto: CreateStationDto) -> Self {
        Station {
            id: 0,
            name: dto.name.trim().to_string(),
            location: dto.location,
            coordinates: dto.coordinates,
            status: dto.status,
            provider_id: dto.provider_id,
            connectors: dto.connectors,
            max_power_kw: dto.max_power_kw,
            session_email: None,
        }
    }
}
