use rust_decimal::Decimal;
use validator::Validate;

use super::model::{User, VehicleClass};
use crate::shared::validations::{
    validate_email_shape, validate_non_negative_decimal, validate_not_blank,
};

/// Registration input, validated before it reaches the store
#[derive(Debug, Clone, Validate)]
pub struct CreateUserDto {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(custom(function = "validate_email_shape"))]
    pub email: String,
    #[validate(custom(function = "validate_non_negative_decimal"))]
    pub balance: Decimal,
    pub vehicle_class: VehicleClass,
}

impl From<CreateUserDto> for User {
    fn from(dto: CreateUserDto) -> Self {
        User::new(dto.name.trim(), dto.email.trim(), dto.balance, dto.vehicle_class)
    }
}
