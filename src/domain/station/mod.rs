//! Charging station aggregate

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::CreateStationDto;
pub use model::{Station, StationStatus, StatusChange};
pub use repository::StationRepository;
