use validator::Validate;

use super::model::Provider;
use crate::shared::validations::{validate_not_blank, validate_optional_email};

#[derive(Debug, Clone, Default, Validate)]
pub struct CreateProviderDto {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    pub contact_person: String,
    #[validate(custom(function = "validate_optional_email"))]
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<CreateProviderDto> for Provider {
    fn from(dto: CreateProviderDto) -> Self {
        Provider::new(dto.name.trim()).with_contact(
            dto.contact_person,
            dto.email,
            dto.phone,
            dto.address,
        )
    }
}
