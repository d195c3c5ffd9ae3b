//! In-memory entity stores

mod provider_store;
mod station_store;
mod user_store;

pub use provider_store::InMemoryProviderStore;
pub use station_store::InMemoryStationStore;
pub use user_store::InMemoryUserStore;
