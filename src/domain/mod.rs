//! Core business entities, value types and repository traits

pub mod compatibility;
pub mod provider;
pub mod station;
pub mod user;

// Re-export commonly used types
pub use compatibility::CompatibilityPolicy;
pub use provider::{CreateProviderDto, Provider, ProviderRepository};
pub use station::{CreateStationDto, Station, StationRepository, StationStatus, StatusChange};
pub use user::{CreateUserDto, User, UserRepository, VehicleClass};

pub use crate::shared::errors::{DomainError, DomainResult};
