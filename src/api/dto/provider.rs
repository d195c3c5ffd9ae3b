//! Provider DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreateProviderDto, Provider};
use crate::shared::validations::{validate_not_blank, validate_optional_email};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProviderResponse {
    pub id: i32,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub station_ids: Vec<i32>,
}

impl From<Provider> for ProviderResponse {
    fn from(provider: Provider) -> Self {
        Self {
            station_ids: provider.station_ids().to_vec(),
            id: provider.id,
            name: provider.name,
            contact_person: provider.contact_person,
            email: provider.email,
            phone: provider.phone,
            address: provider.address,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProviderRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_email"))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl From<CreateProviderRequest> for CreateProviderDto {
    fn from(request: CreateProviderRequest) -> Self {
        Self {
            name: request.name,
            contact_person: request.contact_person,
            email: request.email,
            phone: request.phone,
            address: request.address,
        }
    }
}
