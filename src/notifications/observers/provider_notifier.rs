//! Tells the owning provider about every status change

use std::sync::Arc;

use crate::domain::{DomainResult, ProviderRepository, StationStatus, StatusChange};
use crate::notifications::events::{Notification, NotificationMessage, ProviderAlert};
use crate::notifications::observer::StationObserver;
use crate::notifications::sink::SharedSink;

pub const UNKNOWN_PROVIDER: &str = "unknown provider";

pub fn status_text(status: StationStatus) -> &'static str {
    match status {
        StationStatus::Available => "available",
        StationStatus::Occupied => "occupied",
        StationStatus::OutOfService => "out of service",
        StationStatus::Maintenance => "under maintenance",
    }
}

pub struct ProviderNotifier {
    providers: Arc<dyn ProviderRepository>,
    sink: SharedSink,
}

impl ProviderNotifier {
    pub fn new(providers: Arc<dyn ProviderRepository>, sink: SharedSink) -> Self {
        Self { providers, sink }
    }
}

impl StationObserver for ProviderNotifier {
    fn name(&self) -> &'static str {
        "provider_notifier"
    }

    fn on_status_changed(&self, change: &StatusChange) -> DomainResult<()> {
        if !change.is_change() {
            return Ok(());
        }

        let station = &change.station;
        let provider_name = match station.provider_id {
            Some(id) => self.providers.find_by_id(id)?.map(|p| p.name),
            None => None,
        }
        .unwrap_or_else(|| UNKNOWN_PROVIDER.to_string());

        let alert = ProviderAlert {
            station_id: station.id,
            station_name: station.name.clone(),
            provider_name,
            old_status: change.previous.to_string(),
            new_status: station.status.to_string(),
            status_text: status_text(station.status).to_string(),
        };
        self.sink
            .deliver(NotificationMessage::new(Notification::ProviderAlert(alert)));
        Ok(())
    }
}
