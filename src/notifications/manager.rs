//! Wires the standard observers onto stations

use std::sync::{Arc, Weak};

use tracing::info;

use super::bus::SharedNotificationBus;
use super::observer::SharedObserver;
use super::observers::{ProviderNotifier, StationDisplay, UserNotifier};
use super::sink::SharedSink;
use crate::domain::{DomainResult, ProviderRepository, StationRepository};

/// Holds one shared instance of each standard observer and attaches them
/// to stations in a fixed order: user, provider, display.
pub struct ObserverManager {
    bus: SharedNotificationBus,
    observers: Vec<SharedObserver>,
}

impl ObserverManager {
    pub fn new(
        bus: SharedNotificationBus,
        providers: Arc<dyn ProviderRepository>,
        stations: Weak<dyn StationRepository>,
        sink: SharedSink,
    ) -> Self {
        let observers: Vec<SharedObserver> = vec![
            Arc::new(UserNotifier::new(providers.clone(), sink.clone())),
            Arc::new(ProviderNotifier::new(providers, sink.clone())),
            Arc::new(StationDisplay::new(stations, sink)),
        ];
        Self { bus, observers }
    }

    /// Attach the standard observers to one station. Already attached
    /// observers are left in place.
    pub fn register_observers(&self, station_id: i32) {
        for observer in &self.observers {
            self.bus.add_observer(station_id, observer.clone());
        }
    }

    /// Attach the standard observers to every station in the store.
    pub fn register_all(&self, stations: &dyn StationRepository) -> DomainResult<usize> {
        let all = stations.find_all()?;
        for station in &all {
            self.register_observers(station.id);
        }
        info!(stations = all.len(), "Observers registered");
        Ok(all.len())
    }

    pub fn remove(&self, station_id: i32) {
        self.bus.forget(station_id);
    }
}
