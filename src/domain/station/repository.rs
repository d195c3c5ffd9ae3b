use super::model::{Station, StationStatus};
use crate::domain::DomainResult;

/// Station store contract.
///
/// Every status change made through this trait (including `update` with a
/// different status) notifies the station's observers before returning.
/// Status changes for one station are serialized.
pub trait StationRepository: Send + Sync {
    fn add(&self, station: Station) -> DomainResult<i32>;
    fn find_by_id(&self, id: i32) -> DomainResult<Option<Station>>;
    /// All stations, ordered by id
    fn find_all(&self) -> DomainResult<Vec<Station>>;
    fn find_by_provider(&self, provider_id: i32) -> DomainResult<Vec<Station>>;
    /// Replace a station's details. The session email is never taken
    /// from the argument.
    fn update(&self, station: Station) -> DomainResult<bool>;
    /// Change only the owning provider. Never touches status or session.
    /// `Ok(false)` if the id is unknown.
    fn set_provider(&self, id: i32, provider_id: Option<i32>) -> DomainResult<bool>;
    fn delete(&self, id: i32) -> DomainResult<bool>;
    /// `Ok(false)` if the id is unknown.
    fn update_status(&self, id: i32, status: StationStatus) -> DomainResult<bool>;
    /// Start a session: Available → Occupied with `session_email` recorded.
    /// `Ok(false)` if the station is no longer Available.
    fn claim(&self, id: i32, session_email: &str) -> DomainResult<bool>;
    /// End a session: Occupied → Available. `Ok(false)` if not Occupied.
    fn release(&self, id: i32) -> DomainResult<bool>;
}
