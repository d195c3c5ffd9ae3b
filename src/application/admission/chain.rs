//! Admission chain
//!
//! Runs the rules in a fixed order and stops at the first rejection. When
//! every rule passes, the chain commits the session: the user is debited
//! and the station is claimed, which notifies the station's observers.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use super::rules::{AdmissionRule, Rejection};
use crate::domain::{
    CompatibilityPolicy, DomainError, DomainResult, Station, StationRepository, User,
    UserRepository,
};

/// Final verdict of the chain
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    Accepted,
    Rejected(Rejection),
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted)
    }

    fn outcome_label(&self) -> &'static str {
        match self {
            Admission::Accepted => "accepted",
            Admission::Rejected(r) => r.code(),
        }
    }
}

pub struct AdmissionChain {
    rules: Vec<AdmissionRule>,
    users: Arc<dyn UserRepository>,
    stations: Arc<dyn StationRepository>,
}

impl AdmissionChain {
    /// Availability, then balance, then compatibility.
    pub fn new(
        users: Arc<dyn UserRepository>,
        stations: Arc<dyn StationRepository>,
        compatibility: CompatibilityPolicy,
    ) -> Self {
        Self {
            rules: vec![
                AdmissionRule::Availability,
                AdmissionRule::Balance,
                AdmissionRule::Compatibility(compatibility),
            ],
            users,
            stations,
        }
    }

    pub fn rules(&self) -> &[AdmissionRule] {
        &self.rules
    }

    /// Run every rule without committing anything.
    pub fn screen(&self, user: &User, station: &Station, cost: Decimal) -> Result<(), Rejection> {
        for rule in &self.rules {
            rule.check(user, station, cost)?;
        }
        Ok(())
    }

    /// Screen the request and, if it passes, start the session.
    ///
    /// The debit and the claim are each atomic in the stores; if the
    /// station was taken between screening and claiming, the debit is
    /// refunded and the request is rejected as unavailable. An observer
    /// error raised by the claim is returned as is: the session is running
    /// and the debit is kept.
    pub fn admit(&self, user: &User, station: &Station, cost: Decimal) -> DomainResult<Admission> {
        if cost.is_sign_negative() && !cost.is_zero() {
            return Err(DomainError::validation("estimated cost must not be negative"));
        }

        let admission = match self.screen(user, station, cost) {
            Ok(()) => self.commit(user, station, cost)?,
            Err(rejection) => Admission::Rejected(rejection),
        };

        match &admission {
            Admission::Accepted => info!(
                user_id = user.id,
                station_id = station.id,
                cost = %cost,
                "Charging session started"
            ),
            Admission::Rejected(rejection) => info!(
                user_id = user.id,
                station_id = station.id,
                reason = rejection.code(),
                "Charging request rejected: {}",
                rejection
            ),
        }
        metrics::counter!("charging_admissions_total", "outcome" => admission.outcome_label())
            .increment(1);

        Ok(admission)
    }

    /// Boolean form of [`admit`](Self::admit). Faults count as a refusal,
    /// including an observer fault after the station was claimed.
    pub fn evaluate(&self, user: &User, station: &Station, cost: Decimal) -> bool {
        match self.admit(user, station, cost) {
            Ok(admission) => admission.is_accepted(),
            Err(e) => {
                warn!(
                    user_id = user.id,
                    station_id = station.id,
                    error = %e,
                    "Charging request failed"
                );
                false
            }
        }
    }

    fn commit(&self, user: &User, station: &Station, cost: Decimal) -> DomainResult<Admission> {
        if !self.users.debit(user.id, cost)? {
            let balance = self
                .users
                .find_by_id(user.id)?
                .map(|u| u.balance)
                .unwrap_or(Decimal::ZERO);
            return Ok(Admission::Rejected(Rejection::InsufficientBalance {
                balance,
                required: cost,
            }));
        }

        if self.stations.claim(station.id, &user.email)? {
            return Ok(Admission::Accepted);
        }

        self.users.credit(user.id, cost)?;
        let status = self
            .stations
            .find_by_id(station.id)?
            .map(|s| s.status)
            .ok_or_else(|| DomainError::not_found("Station", "id", station.id))?;
        Ok(Admission::Rejected(Rejection::Unavailable { status }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StationStatus, VehicleClass};
    use crate::infrastructure::{InMemoryStationStore, InMemoryUserStore};
    use crate::notifications::NotificationBus;

    struct Fixture {
        users: Arc<InMemoryUserStore>,
        stations: Arc<InMemoryStationStore>,
        chain: AdmissionChain,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserStore::new());
        let stations = Arc::new(InMemoryStationStore::new(Arc::new(
            NotificationBus::default(),
        )));
        let chain = AdmissionChain::new(
            users.clone(),
            stations.clone(),
            CompatibilityPolicy::standard(),
        );
        Fixture {
            users,
            stations,
            chain,
        }
    }

    fn seed(f: &Fixture, balance: i64, class: VehicleClass, status: StationStatus, kw: f64) -> (User, Station) {
        let id = f
            .users
            .add(User::new("Driver", "driver@example.com", Decimal::from(balance), class))
            .unwrap();
        let sid = f
            .stations
            .add(Station::new("Hub", kw).with_status(status))
            .unwrap();
        (
            f.users.find_by_id(id).unwrap().unwrap(),
            f.stations.find_by_id(sid).unwrap().unwrap(),
        )
    }

    #[test]
    fn rules_run_in_fixed_order() {
        let f = fixture();
        let names: Vec<&str> = f.chain.rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["availability", "balance", "compatibility"]);
    }

    /// Every combination of the three predicates: the first failing rule
    /// decides, and only the all-pass row commits.
    #[test]
    fn truth_table_first_failure_wins() {
        for available in [true, false] {
            for funded in [true, false] {
                for compatible in [true, false] {
                    let f = fixture();
                    let status = if available {
                        StationStatus::Available
                    } else {
                        StationStatus::Maintenance
                    };
                    let balance = if funded { 20 } else { 5 };
                    let kw = if compatible { 50.0 } else { 150.0 };
                    let (user, station) = seed(&f, balance, VehicleClass::Compact, status, kw);

                    let admission = f.chain.admit(&user, &station, Decimal::from(15)).unwrap();

                    let expected = if !available {
                        Some("unavailable")
                    } else if !funded {
                        Some("insufficient_balance")
                    } else if !compatible {
                        Some("incompatible")
                    } else {
                        None
                    };
                    match (&admission, expected) {
                        (Admission::Accepted, None) => {}
                        (Admission::Rejected(r), Some(code)) => assert_eq!(r.code(), code),
                        other => panic!("unexpected verdict {:?}", other),
                    }

                    let stored_user = f.users.find_by_id(user.id).unwrap().unwrap();
                    let stored_station = f.stations.find_by_id(station.id).unwrap().unwrap();
                    if admission.is_accepted() {
                        assert_eq!(stored_user.balance, Decimal::from(balance - 15));
                        assert!(stored_station.is_occupied());
                        assert_eq!(
                            stored_station.session_email.as_deref(),
                            Some("driver@example.com")
                        );
                    } else {
                        assert_eq!(stored_user.balance, Decimal::from(balance));
                        assert_eq!(stored_station.status, status);
                        assert_eq!(stored_station.session_email, None);
                    }
                }
            }
        }
    }

    #[test]
    fn exact_balance_and_exact_power_are_admitted() {
        let f = fixture();
        let (user, station) = seed(&f, 15, VehicleClass::Compact, StationStatus::Available, 50.0);
        assert!(f.chain.evaluate(&user, &station, Decimal::from(15)));
        assert_eq!(
            f.users.find_by_id(user.id).unwrap().unwrap().balance,
            Decimal::ZERO
        );
    }

    #[test]
    fn stale_snapshot_is_refunded_when_station_was_taken() {
        let f = fixture();
        let (user, station) = seed(&f, 100, VehicleClass::Sedan, StationStatus::Available, 22.0);
        // Someone else takes the station after our snapshot was read
        f.stations.claim(station.id, "other@example.com").unwrap();

        let admission = f.chain.admit(&user, &station, Decimal::from(30)).unwrap();

        assert_eq!(
            admission,
            Admission::Rejected(Rejection::Unavailable {
                status: StationStatus::Occupied
            })
        );
        assert_eq!(
            f.users.find_by_id(user.id).unwrap().unwrap().balance,
            Decimal::from(100)
        );
    }

    #[test]
    fn negative_cost_is_a_validation_error() {
        let f = fixture();
        let (user, station) = seed(&f, 100, VehicleClass::Sedan, StationStatus::Available, 22.0);
        assert!(matches!(
            f.chain.admit(&user, &station, Decimal::from(-1)),
            Err(DomainError::Validation(_))
        ));
        assert!(!f.chain.evaluate(&user, &station, Decimal::from(-1)));
    }
}
