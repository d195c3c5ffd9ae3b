//! User DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreateUserDto, DomainResult, User, VehicleClass};
use crate::shared::validations::{
    validate_email_shape, validate_non_negative_decimal, validate_not_blank,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[schema(value_type = String, example = "120.50")]
    pub balance: Decimal,
    /// `Sedan`, `SUV`, `Compact`, `Sports`, `Truck`, `Van` or `Luxury`
    pub vehicle_class: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            balance: user.balance,
            vehicle_class: user.vehicle_class.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(custom(function = "validate_email_shape"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "validate_non_negative_decimal"))]
    #[schema(value_type = String, example = "50.00")]
    pub balance: Decimal,
    #[validate(custom(function = "validate_not_blank"))]
    pub vehicle_class: String,
}

impl CreateUserRequest {
    pub fn into_dto(self) -> DomainResult<CreateUserDto> {
        let vehicle_class: VehicleClass = self.vehicle_class.parse()?;
        Ok(CreateUserDto {
            name: self.name,
            email: self.email,
            balance: self.balance,
            vehicle_class,
        })
    }
}

/// Amount to add to a balance
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FundsRequest {
    #[validate(custom(function = "validate_non_negative_decimal"))]
    #[schema(value_type = String, example = "25.00")]
    pub amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BalanceResponse {
    pub user_id: i32,
    #[schema(value_type = String, example = "145.50")]
    pub balance: Decimal,
}
