//! Application services
//!
//! The validation boundary: inputs are checked here before they reach the
//! stores.

mod provider;
mod queries;
mod station;
mod user;

pub use provider::ProviderService;
pub use queries::StationQueries;
pub use station::StationService;
pub use user::UserService;
