//! User aggregate
//!
//! Contains the User entity, its registration DTO, and repository interface.

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::CreateUserDto;
pub use model::{User, VehicleClass};
pub use repository::UserRepository;
