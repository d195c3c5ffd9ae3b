//! In-memory station store
//!
//! Owns the notification bus: every status change made through the store
//! is dispatched to the station's observers before the call returns.
//! Status changes for one station are serialized by a per-station gate,
//! and the map entry is released before observers run so they can read
//! the store freely.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use tracing::debug;

use crate::domain::{
    DomainResult, Station, StationRepository, StationStatus, StatusChange,
};
use crate::notifications::SharedNotificationBus;

pub struct InMemoryStationStore {
    stations: DashMap<i32, Station>,
    gates: DashMap<i32, Arc<Mutex<()>>>,
    bus: SharedNotificationBus,
    counter: AtomicI32,
}

impl InMemoryStationStore {
    pub fn new(bus: SharedNotificationBus) -> Self {
        Self {
            stations: DashMap::new(),
            gates: DashMap::new(),
            bus,
            counter: AtomicI32::new(1),
        }
    }

    pub fn bus(&self) -> &SharedNotificationBus {
        &self.bus
    }

    fn gate(&self, id: i32) -> Arc<Mutex<()>> {
        self.gates.entry(id).or_default().clone()
    }

    /// Run `mutate` on the stored station under its gate and notify the
    /// observers with the resulting change, if any.
    ///
    /// `mutate` returns `None` when its precondition does not hold, in
    /// which case nothing is stored or dispatched.
    fn change_status<F>(&self, id: i32, mutate: F) -> DomainResult<bool>
    where
        F: FnOnce(&mut Station) -> Option<StatusChange>,
    {
        let gate = self.gate(id);
        let _held = gate.lock().unwrap_or_else(PoisonError::into_inner);

        let change = match self.stations.get_mut(&id) {
            Some(mut station) => match mutate(&mut *station) {
                Some(change) => change,
                None => return Ok(false),
            },
            None => return Ok(false),
        };

        self.dispatch(&change)?;
        Ok(true)
    }

    /// Must be called with the station's gate held and no map guard alive.
    fn dispatch(&self, change: &StatusChange) -> DomainResult<()> {
        debug!(
            station_id = change.station.id,
            from = %change.previous,
            to = %change.current(),
            "Station status changed"
        );
        self.bus.notify(change)
    }
}

impl StationRepository for InMemoryStationStore {
    fn add(&self, mut station: Station) -> DomainResult<i32> {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        station.id = id;
        self.stations.insert(id, station);
        debug!(station_id = id, "Station stored");
        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> DomainResult<Option<Station>> {
        Ok(self.stations.get(&id).map(|s| s.clone()))
    }

    fn find_all(&self) -> DomainResult<Vec<Station>> {
        let mut stations: Vec<Station> =
            self.stations.iter().map(|s| s.value().clone()).collect();
        stations.sort_by_key(|s| s.id);
        Ok(stations)
    }

    fn find_by_provider(&self, provider_id: i32) -> DomainResult<Vec<Station>> {
        let mut stations: Vec<Station> = self
            .stations
            .iter()
            .filter(|s| s.provider_id == Some(provider_id))
            .map(|s| s.value().clone())
            .collect();
        stations.sort_by_key(|s| s.id);
        Ok(stations)
    }

    /// Replace the stored record. The session email is kept from the
    /// stored record. A different status goes through the same transition
    /// and notification path as `update_status`; the comparison and the
    /// write happen under the station's gate.
    fn update(&self, station: Station) -> DomainResult<bool> {
        let id = station.id;
        let gate = self.gate(id);
        let _held = gate.lock().unwrap_or_else(PoisonError::into_inner);

        let change = match self.stations.get_mut(&id) {
            Some(mut stored) => {
                let next = station.status;
                let email_before = stored.session_email.clone();
                let current = stored.status;
                *stored = Station {
                    status: current,
                    session_email: email_before.clone(),
                    ..station
                };
                if current == next {
                    None
                } else {
                    let previous = stored.transition(next);
                    let email = stored.session_email.clone().or(email_before);
                    Some(StatusChange::new(stored.clone(), previous, email))
                }
            }
            None => return Ok(false),
        };

        if let Some(change) = change {
            self.dispatch(&change)?;
        }
        Ok(true)
    }

    fn set_provider(&self, id: i32, provider_id: Option<i32>) -> DomainResult<bool> {
        let gate = self.gate(id);
        let _held = gate.lock().unwrap_or_else(PoisonError::into_inner);

        match self.stations.get_mut(&id) {
            Some(mut station) => {
                station.provider_id = provider_id;
                debug!(station_id = id, provider_id = ?provider_id, "Station owner set");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: i32) -> DomainResult<bool> {
        let removed = self.stations.remove(&id).is_some();
        if removed {
            self.gates.remove(&id);
            self.bus.forget(id);
        }
        Ok(removed)
    }

    fn update_status(&self, id: i32, status: StationStatus) -> DomainResult<bool> {
        self.change_status(id, |station| {
            let email_before = station.session_email.clone();
            let previous = station.transition(status);
            let email = station.session_email.clone().or(email_before);
            Some(StatusChange::new(station.clone(), previous, email))
        })
    }

    fn claim(&self, id: i32, session_email: &str) -> DomainResult<bool> {
        self.change_status(id, |station| {
            if !station.is_available() {
                return None;
            }
            station.session_email = Some(session_email.to_string());
            let previous = station.transition(StationStatus::Occupied);
            Some(StatusChange::new(
                station.clone(),
                previous,
                Some(session_email.to_string()),
            ))
        })
    }

    fn release(&self, id: i32) -> DomainResult<bool> {
        self.change_status(id, |station| {
            if !station.is_occupied() {
                return None;
            }
            let ending = station.session_email.clone();
            let previous = station.transition(StationStatus::Available);
            Some(StatusChange::new(station.clone(), previous, ending))
        })
    }
}
