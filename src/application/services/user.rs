//! User registration and balance management

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use validator::Validate;

use crate::domain::{CreateUserDto, DomainError, DomainResult, User, UserRepository};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub fn register(&self, dto: CreateUserDto) -> DomainResult<User> {
        dto.validate()?;
        let mut user = User::from(dto);
        user.id = self.users.add(user.clone())?;
        info!(user_id = user.id, email = %user.email, "User registered");
        Ok(user)
    }

    pub fn get(&self, id: i32) -> DomainResult<User> {
        self.users
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("User", "id", id))
    }

    pub fn get_by_email(&self, email: &str) -> DomainResult<User> {
        self.users
            .find_by_email(email)?
            .ok_or_else(|| DomainError::not_found("User", "email", email))
    }

    pub fn list(&self) -> DomainResult<Vec<User>> {
        self.users.find_all()
    }

    pub fn update(&self, user: User) -> DomainResult<User> {
        CreateUserDto {
            name: user.name.clone(),
            email: user.email.clone(),
            balance: user.balance,
            vehicle_class: user.vehicle_class,
        }
        .validate()?;

        if !self.users.update(user.clone())? {
            return Err(DomainError::not_found("User", "id", user.id));
        }
        Ok(user)
    }

    pub fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.users.delete(id)? {
            return Err(DomainError::not_found("User", "id", id));
        }
        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Returns the new balance.
    pub fn add_funds(&self, id: i32, amount: Decimal) -> DomainResult<Decimal> {
        let balance = self.users.credit(id, amount)?;
        info!(user_id = id, amount = %amount, balance = %balance, "Funds added");
        Ok(balance)
    }

    /// `Ok(false)` when the balance does not cover `amount`.
    pub fn deduct_funds(&self, id: i32, amount: Decimal) -> DomainResult<bool> {
        self.users.debit(id, amount)
    }
}
