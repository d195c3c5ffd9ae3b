use super::model::Provider;
use crate::domain::DomainResult;

pub trait ProviderRepository: Send + Sync {
    fn add(&self, provider: Provider) -> DomainResult<i32>;
    fn find_by_id(&self, id: i32) -> DomainResult<Option<Provider>>;
    fn find_all(&self) -> DomainResult<Vec<Provider>>;
    fn update(&self, provider: Provider) -> DomainResult<bool>;
    fn delete(&self, id: i32) -> DomainResult<bool>;
    /// Append a station id to the provider's list. `Ok(false)` if already listed.
    fn link_station(&self, provider_id: i32, station_id: i32) -> DomainResult<bool>;
    /// Remove a station id from the provider's list. `Ok(false)` if not listed.
    fn unlink_station(&self, provider_id: i32, station_id: i32) -> DomainResult<bool>;
}
