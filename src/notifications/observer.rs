use std::sync::Arc;

use crate::domain::{DomainResult, StatusChange};

/// Listener for station status transitions.
///
/// Called synchronously while the station's status gate is held, so an
/// observer must not change the status of the station it is notified
/// about. Reading any store is fine.
pub trait StationObserver: Send + Sync {
    /// Short identifier used in logs and errors
    fn name(&self) -> &'static str;

    fn on_status_changed(&self, change: &StatusChange) -> DomainResult<()>;
}

pub type SharedObserver = Arc<dyn StationObserver>;

/// Identity comparison, ignoring vtable pointers.
pub fn same_observer(a: &SharedObserver, b: &SharedObserver) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
