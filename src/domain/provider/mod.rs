//! Provider aggregate

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::CreateProviderDto;
pub use model::Provider;
pub use repository::ProviderRepository;
