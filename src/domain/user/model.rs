//! User domain entity

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::shared::errors::{DomainError, DomainResult};

/// Vehicle category, used to look up the maximum compatible charging power
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VehicleClass {
    Sedan,
    Suv,
    Compact,
    Sports,
    Truck,
    Van,
    Luxury,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 7] = [
        Self::Sedan,
        Self::Suv,
        Self::Compact,
        Self::Sports,
        Self::Truck,
        Self::Van,
        Self::Luxury,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sedan => "Sedan",
            Self::Suv => "SUV",
            Self::Compact => "Compact",
            Self::Sports => "Sports",
            Self::Truck => "Truck",
            Self::Van => "Van",
            Self::Luxury => "Luxury",
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VehicleClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedan" => Ok(Self::Sedan),
            "suv" => Ok(Self::Suv),
            "compact" => Ok(Self::Compact),
            "sports" => Ok(Self::Sports),
            "truck" => Ok(Self::Truck),
            "van" => Ok(Self::Van),
            "luxury" => Ok(Self::Luxury),
            other => Err(DomainError::Validation(format!(
                "unknown vehicle class '{}'",
                other
            ))),
        }
    }
}

/// Registered driver with a prepaid balance
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Store-assigned identifier, 0 until persisted
    pub id: i32,
    pub name: String,
    /// Unique across users (case-insensitive)
    pub email: String,
    pub balance: Decimal,
    pub vehicle_class: VehicleClass,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        balance: Decimal,
        vehicle_class: VehicleClass,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            balance,
            vehicle_class,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    pub fn can_afford(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }

    /// Add funds, returning the new balance.
    pub fn add_funds(&mut self, amount: Decimal) -> DomainResult<Decimal> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::validation("cannot add a negative amount"));
        }
        self.balance += amount;
        Ok(self.balance)
    }

    /// Deduct funds if the balance covers them. Returns `false` and leaves
    /// the balance untouched otherwise.
    pub fn deduct_funds(&mut self, amount: Decimal) -> DomainResult<bool> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::validation("cannot deduct a negative amount"));
        }
        if !self.can_afford(amount) {
            return Ok(false);
        }
        self.balance -= amount;
        Ok(true)
    }
}
