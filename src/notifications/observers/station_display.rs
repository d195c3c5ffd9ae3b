//! System-wide availability board, refreshed on any station's change

use std::sync::Weak;

use tracing::debug;

use crate::domain::{DomainResult, Station, StationRepository, StationStatus, StatusChange};
use crate::notifications::events::{Notification, NotificationMessage, StationBoard};
use crate::notifications::observer::StationObserver;
use crate::notifications::sink::SharedSink;

/// Partition stations into available / occupied name lists, keeping the
/// input order. Other statuses appear in neither list.
pub fn build_board(stations: &[Station]) -> StationBoard {
    let names = |status: StationStatus| {
        stations
            .iter()
            .filter(|s| s.status == status)
            .map(|s| s.name.clone())
            .collect()
    };
    StationBoard {
        available: names(StationStatus::Available),
        occupied: names(StationStatus::Occupied),
    }
}

pub struct StationDisplay {
    // Weak: the station store owns the bus that owns this observer
    stations: Weak<dyn StationRepository>,
    sink: SharedSink,
}

impl StationDisplay {
    pub fn new(stations: Weak<dyn StationRepository>, sink: SharedSink) -> Self {
        Self { stations, sink }
    }
}

impl StationObserver for StationDisplay {
    fn name(&self) -> &'static str {
        "station_display"
    }

    fn on_status_changed(&self, change: &StatusChange) -> DomainResult<()> {
        if !change.is_change() {
            return Ok(());
        }
        let Some(stations) = self.stations.upgrade() else {
            debug!("Station store dropped, skipping display refresh");
            return Ok(());
        };

        let board = build_board(&stations.find_all()?);
        self.sink
            .deliver(NotificationMessage::new(Notification::StationBoard(board)));
        Ok(())
    }
}
