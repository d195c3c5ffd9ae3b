//! Charging station domain entity

use std::str::FromStr;

use crate::shared::errors::DomainError;

/// Operational status of a charging station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationStatus {
    Available,
    Occupied,
    OutOfService,
    Maintenance,
}

impl Default for StationStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl StationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::OutOfService => "OutOfService",
            Self::Maintenance => "Maintenance",
        }
    }
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "outofservice" => Ok(Self::OutOfService),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(DomainError::Validation(format!(
                "unknown station status '{}'",
                s
            ))),
        }
    }
}

/// Charging station entity.
///
/// Observers are not part of the entity; they are registered per station
/// id on the notification bus.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Station {
    /// Store-assigned identifier, 0 until persisted
    pub id: i32,
    pub name: String,
    pub location: String,
    /// GPS coordinates as "latitude,longitude"
    pub coordinates: String,
    pub status: StationStatus,
    /// Owning provider, resolved through the provider store
    pub provider_id: Option<i32>,
    pub connectors: u32,
    pub max_power_kw: f64,
    /// Email of the user charging here; only set while Occupied
    pub session_email: Option<String>,
}

impl Station {
    pub fn new(name: impl Into<String>, max_power_kw: f64) -> Self {
        Self {
            name: name.into(),
            max_power_kw,
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: StationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_location(
        mut self,
        location: impl Into<String>,
        coordinates: impl Into<String>,
    ) -> Self {
        self.location = location.into();
        self.coordinates = coordinates.into();
        self
    }

    pub fn with_provider(mut self, provider_id: i32) -> Self {
        self.provider_id = Some(provider_id);
        self
    }

    pub fn with_connectors(mut self, connectors: u32) -> Self {
        self.connectors = connectors;
        self
    }

    pub fn is_available(&self) -> bool {
        self.status == StationStatus::Available
    }

    pub fn is_occupied(&self) -> bool {
        self.status == StationStatus::Occupied
    }

    /// Move to `next`, returning the previous status.
    ///
    /// Leaving Occupied for Available always ends the session, so the
    /// session email is cleared.
    pub fn transition(&mut self, next: StationStatus) -> StationStatus {
        let previous = self.status;
        self.status = next;
        if previous == StationStatus::Occupied && next == StationStatus::Available {
            self.session_email = None;
        }
        previous
    }
}

/// A status transition as delivered to observers
#[derive(Debug, Clone)]
pub struct StatusChange {
    /// Station state after the transition
    pub station: Station,
    pub previous: StationStatus,
    /// Session email involved in the transition: the new session's email
    /// when charging starts, the just-cleared one when it ends.
    pub session_email: Option<String>,
}

impl StatusChange {
    pub fn new(station: Station, previous: StationStatus, session_email: Option<String>) -> Self {
        Self {
            station,
            previous,
            session_email,
        }
    }

    pub fn current(&self) -> StationStatus {
        self.station.status
    }

    pub fn is_change(&self) -> bool {
        self.previous != self.station.status
    }

    pub fn started_session(&self) -> bool {
        self.current() == StationStatus::Occupied && self.previous != StationStatus::Occupied
    }

    pub fn ended_session(&self) -> bool {
        self.previous == StationStatus::Occupied && self.current() == StationStatus::Available
    }
}
