//! Admission rules

use rust_decimal::Decimal;

use crate::domain::{CompatibilityPolicy, Station, StationStatus, User, VehicleClass};

/// Why a charging request was turned down
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    Unavailable {
        status: StationStatus,
    },
    InsufficientBalance {
        balance: Decimal,
        required: Decimal,
    },
    Incompatible {
        vehicle_class: VehicleClass,
        limit_kw: f64,
        station_kw: f64,
    },
}

impl Rejection {
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::Unavailable { .. } => "unavailable",
            Rejection::InsufficientBalance { .. } => "insufficient_balance",
            Rejection::Incompatible { .. } => "incompatible",
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Unavailable { status } => {
                write!(f, "station is not available (status {})", status)
            }
            Rejection::InsufficientBalance { balance, required } => write!(
                f,
                "insufficient balance: {} available, {} required",
                balance, required
            ),
            Rejection::Incompatible {
                vehicle_class,
                limit_kw,
                station_kw,
            } => write!(
                f,
                "station power {} kW exceeds the {} kW limit for {}",
                station_kw, limit_kw, vehicle_class
            ),
        }
    }
}

/// One step of the admission chain. Checks are side-effect free.
#[derive(Debug, Clone, PartialEq)]
pub enum AdmissionRule {
    Availability,
    Balance,
    Compatibility(CompatibilityPolicy),
}

impl AdmissionRule {
    pub fn name(&self) -> &'static str {
        match self {
            AdmissionRule::Availability => "availability",
            AdmissionRule::Balance => "balance",
            AdmissionRule::Compatibility(_) => "compatibility",
        }
    }

    pub fn check(&self, user: &User, station: &Station, cost: Decimal) -> Result<(), Rejection> {
        match self {
            AdmissionRule::Availability => {
                if station.status == StationStatus::Available {
                    Ok(())
                } else {
                    Err(Rejection::Unavailable {
                        status: station.status,
                    })
                }
            }
            AdmissionRule::Balance => {
                if user.can_afford(cost) {
                    Ok(())
                } else {
                    Err(Rejection::InsufficientBalance {
                        balance: user.balance,
                        required: cost,
                    })
                }
            }
            AdmissionRule::Compatibility(policy) => {
                match policy.limit_for(user.vehicle_class) {
                    Some(limit) if station.max_power_kw > limit => Err(Rejection::Incompatible {
                        vehicle_class: user.vehicle_class,
                        limit_kw: limit,
                        station_kw: station.max_power_kw,
                    }),
                    _ => Ok(()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(balance: i64, class: VehicleClass) -> User {
        User::new("U", "u@example.com", Decimal::from(balance), class)
    }

    #[test]
    fn availability_only_passes_available_stations() {
        let u = user(100, VehicleClass::Sedan);
        for status in [
            StationStatus::Occupied,
            StationStatus::OutOfService,
            StationStatus::Maintenance,
        ] {
            let s = Station::new("S", 22.0).with_status(status);
            assert_eq!(
                AdmissionRule::Availability.check(&u, &s, Decimal::ONE),
                Err(Rejection::Unavailable { status })
            );
        }
        let s = Station::new("S", 22.0);
        assert!(AdmissionRule::Availability.check(&u, &s, Decimal::ONE).is_ok());
    }

    #[test]
    fn balance_equal_to_cost_passes() {
        let s = Station::new("S", 22.0);
        let rule = AdmissionRule::Balance;
        assert!(rule.check(&user(15, VehicleClass::Sedan), &s, Decimal::from(15)).is_ok());
        assert_eq!(
            rule.check(&user(5, VehicleClass::Sedan), &s, Decimal::from(15)),
            Err(Rejection::InsufficientBalance {
                balance: Decimal::from(5),
                required: Decimal::from(15),
            })
        );
    }

    #[test]
    fn compatibility_uses_the_policy_table() {
        let rule = AdmissionRule::Compatibility(CompatibilityPolicy::standard());
        let compact = user(100, VehicleClass::Compact);

        assert!(rule.check(&compact, &Station::new("S", 50.0), Decimal::ONE).is_ok());
        let err = rule
            .check(&compact, &Station::new("S", 150.0), Decimal::ONE)
            .unwrap_err();
        assert_eq!(err.code(), "incompatible");
        assert_eq!(
            err.to_string(),
            "station power 150 kW exceeds the 50 kW limit for Compact"
        );
    }
}
