//! Charging request processor
//!
//! Resolves the user and station by id, hands them to the admission chain
//! and ends sessions. Each operation has a typed form and the boolean form
//! callers that only need yes/no use.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use super::admission::{Admission, AdmissionChain, Rejection};
use crate::domain::{DomainResult, StationRepository, StationStatus, UserRepository};

#[derive(Debug, Clone, PartialEq)]
pub enum ChargingOutcome {
    Started,
    Rejected(Rejection),
    UserNotFound(i32),
    StationNotFound(i32),
}

impl ChargingOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, ChargingOutcome::Started)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StopOutcome {
    Stopped,
    /// The station exists but has no session to end
    NotOccupied(StationStatus),
    StationNotFound(i32),
}

impl StopOutcome {
    pub fn is_stopped(&self) -> bool {
        matches!(self, StopOutcome::Stopped)
    }
}

pub struct ChargingRequestProcessor {
    users: Arc<dyn UserRepository>,
    stations: Arc<dyn StationRepository>,
    chain: AdmissionChain,
}

impl ChargingRequestProcessor {
    pub fn new(
        users: Arc<dyn UserRepository>,
        stations: Arc<dyn StationRepository>,
        chain: AdmissionChain,
    ) -> Self {
        Self {
            users,
            stations,
            chain,
        }
    }

    pub fn chain(&self) -> &AdmissionChain {
        &self.chain
    }

    pub fn request_charging(
        &self,
        user_id: i32,
        station_id: i32,
        estimated_cost: Decimal,
    ) -> DomainResult<ChargingOutcome> {
        let Some(user) = self.users.find_by_id(user_id)? else {
            return Ok(ChargingOutcome::UserNotFound(user_id));
        };
        let Some(station) = self.stations.find_by_id(station_id)? else {
            return Ok(ChargingOutcome::StationNotFound(station_id));
        };

        Ok(match self.chain.admit(&user, &station, estimated_cost)? {
            Admission::Accepted => ChargingOutcome::Started,
            Admission::Rejected(rejection) => ChargingOutcome::Rejected(rejection),
        })
    }

    /// `true` when the session was started and every observer accepted the
    /// start. `false` on a rejection, an unknown id or an error. Under the
    /// fail-fast policy an observer error raised while claiming the station
    /// also yields `false` although the station stays occupied and the cost
    /// stays debited; end the session with [`stop_charging`](Self::stop_charging).
    pub fn process_charging_request(
        &self,
        user_id: i32,
        station_id: i32,
        estimated_cost: Decimal,
    ) -> bool {
        match self.request_charging(user_id, station_id, estimated_cost) {
            Ok(outcome) => {
                if let ChargingOutcome::UserNotFound(_) | ChargingOutcome::StationNotFound(_) =
                    outcome
                {
                    info!(user_id, station_id, outcome = ?outcome, "Charging request not resolved");
                }
                outcome.is_started()
            }
            Err(e) => {
                warn!(user_id, station_id, error = %e, "Charging request failed");
                false
            }
        }
    }

    pub fn end_session(&self, station_id: i32) -> DomainResult<StopOutcome> {
        let Some(station) = self.stations.find_by_id(station_id)? else {
            return Ok(StopOutcome::StationNotFound(station_id));
        };
        if !station.is_occupied() {
            return Ok(StopOutcome::NotOccupied(station.status));
        }

        if self.stations.release(station_id)? {
            info!(station_id, "Charging session stopped");
            return Ok(StopOutcome::Stopped);
        }

        // Ended concurrently by another caller
        let status = self
            .stations
            .find_by_id(station_id)?
            .map(|s| s.status)
            .unwrap_or(StationStatus::Available);
        Ok(StopOutcome::NotOccupied(status))
    }

    /// `true` only when an ongoing session was ended.
    pub fn stop_charging(&self, station_id: i32) -> bool {
        match self.end_session(station_id) {
            Ok(outcome) => outcome.is_stopped(),
            Err(e) => {
                warn!(station_id, error = %e, "Stop charging failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CompatibilityPolicy, DomainError, Station, StatusChange, User, VehicleClass,
    };
    use crate::infrastructure::{InMemoryStationStore, InMemoryUserStore};
    use crate::notifications::{DispatchPolicy, NotificationBus, StationObserver};

    fn processor() -> (
        Arc<InMemoryUserStore>,
        Arc<InMemoryStationStore>,
        ChargingRequestProcessor,
    ) {
        let users = Arc::new(InMemoryUserStore::new());
        let stations = Arc::new(InMemoryStationStore::new(Arc::new(
            NotificationBus::default(),
        )));
        let chain = AdmissionChain::new(
            users.clone(),
            stations.clone(),
            CompatibilityPolicy::standard(),
        );
        let processor = ChargingRequestProcessor::new(users.clone(), stations.clone(), chain);
        (users, stations, processor)
    }

    fn add_user(users: &InMemoryUserStore, balance: i64, class: VehicleClass) -> i32 {
        users
            .add(User::new("John", "john@example.com", Decimal::from(balance), class))
            .unwrap()
    }

    #[test]
    fn occupied_station_rejects_without_side_effects() {
        let (users, stations, p) = processor();
        let user_id = add_user(&users, 100, VehicleClass::Sedan);
        let station_id = stations
            .add(Station::new("Mall", 50.0).with_status(StationStatus::Occupied))
            .unwrap();

        assert!(!p.process_charging_request(user_id, station_id, Decimal::from(30)));
        assert!(stations.find_by_id(station_id).unwrap().unwrap().is_occupied());
        assert_eq!(
            users.find_by_id(user_id).unwrap().unwrap().balance,
            Decimal::from(100)
        );
    }

    #[test]
    fn unknown_ids_are_reported_not_raised() {
        let (users, stations, p) = processor();
        let user_id = add_user(&users, 100, VehicleClass::Sedan);
        let station_id = stations.add(Station::new("Hub", 22.0)).unwrap();

        assert_eq!(
            p.request_charging(99, station_id, Decimal::ONE).unwrap(),
            ChargingOutcome::UserNotFound(99)
        );
        assert_eq!(
            p.request_charging(user_id, 77, Decimal::ONE).unwrap(),
            ChargingOutcome::StationNotFound(77)
        );
        assert!(!p.process_charging_request(99, 77, Decimal::ONE));
    }

    #[test]
    fn stop_is_idempotent() {
        let (users, stations, p) = processor();
        let user_id = add_user(&users, 100, VehicleClass::Sedan);
        let station_id = stations.add(Station::new("Hub", 22.0)).unwrap();

        assert!(p.process_charging_request(user_id, station_id, Decimal::from(10)));
        assert!(p.stop_charging(station_id));
        assert!(!p.stop_charging(station_id));
        assert_eq!(
            p.end_session(station_id).unwrap(),
            StopOutcome::NotOccupied(StationStatus::Available)
        );
        assert_eq!(
            p.end_session(404).unwrap(),
            StopOutcome::StationNotFound(404)
        );

        let station = stations.find_by_id(station_id).unwrap().unwrap();
        assert!(station.is_available());
        assert_eq!(station.session_email, None);
    }

    #[test]
    fn stop_on_maintenance_station_is_refused() {
        let (_, stations, p) = processor();
        let station_id = stations
            .add(Station::new("Hub", 22.0).with_status(StationStatus::Maintenance))
            .unwrap();
        assert!(!p.stop_charging(station_id));
        assert_eq!(
            stations.find_by_id(station_id).unwrap().unwrap().status,
            StationStatus::Maintenance
        );
    }

    struct Unreachable;

    impl StationObserver for Unreachable {
        fn name(&self) -> &'static str {
            "unreachable"
        }

        fn on_status_changed(&self, _change: &StatusChange) -> DomainResult<()> {
            Err(DomainError::validation("display offline"))
        }
    }

    #[test]
    fn fail_fast_observer_error_reports_false_but_session_runs() {
        let users = Arc::new(InMemoryUserStore::new());
        let stations = Arc::new(InMemoryStationStore::new(Arc::new(NotificationBus::new(
            DispatchPolicy::FailFast,
        ))));
        let chain = AdmissionChain::new(
            users.clone(),
            stations.clone(),
            CompatibilityPolicy::standard(),
        );
        let p = ChargingRequestProcessor::new(users.clone(), stations.clone(), chain);
        let user_id = add_user(&users, 100, VehicleClass::Sedan);
        let station_id = stations.add(Station::new("Hub", 22.0)).unwrap();
        stations.bus().add_observer(station_id, Arc::new(Unreachable));

        assert!(!p.process_charging_request(user_id, station_id, Decimal::from(30)));

        let station = stations.find_by_id(station_id).unwrap().unwrap();
        assert!(station.is_occupied());
        assert_eq!(station.session_email.as_deref(), Some("john@example.com"));
        assert_eq!(
            users.find_by_id(user_id).unwrap().unwrap().balance,
            Decimal::from(70)
        );

        // The release is kept even though the same observer fails again
        assert!(matches!(
            p.end_session(station_id),
            Err(DomainError::Observer { observer: "unreachable", .. })
        ));
        assert!(stations.find_by_id(station_id).unwrap().unwrap().is_available());
    }
}
