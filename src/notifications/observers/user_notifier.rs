//! Emails the driver when their session starts or ends

use std::sync::Arc;

use crate::domain::{DomainResult, ProviderRepository, Station, StatusChange};
use crate::notifications::events::{EmailMessage, Notification, NotificationMessage};
use crate::notifications::observer::StationObserver;
use crate::notifications::sink::SharedSink;

pub const DEFAULT_SENDER: &str = "noreply@chargingstations.com";

pub struct UserNotifier {
    providers: Arc<dyn ProviderRepository>,
    sink: SharedSink,
    sender: String,
}

impl UserNotifier {
    pub fn new(providers: Arc<dyn ProviderRepository>, sink: SharedSink) -> Self {
        Self::with_sender(providers, sink, DEFAULT_SENDER)
    }

    pub fn with_sender(
        providers: Arc<dyn ProviderRepository>,
        sink: SharedSink,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            providers,
            sink,
            sender: sender.into(),
        }
    }

    fn signature(&self, station: &Station) -> DomainResult<String> {
        let name = match station.provider_id {
            Some(id) => self.providers.find_by_id(id)?.map(|p| p.name),
            None => None,
        };
        Ok(name.unwrap_or_else(|| "Provider".to_string()))
    }

    fn started(&self, station: &Station, to: &str) -> DomainResult<EmailMessage> {
        Ok(EmailMessage {
            from: self.sender.clone(),
            to: to.to_string(),
            subject: "Charging started!".to_string(),
            body: format!(
                "Hello,\n\nyour charging session at station {} has started.\n\
                 Charging power: {} kW\n\nBest regards,\n[{}]",
                station.name,
                station.max_power_kw,
                self.signature(station)?
            ),
        })
    }

    fn ended(&self, station: &Station, to: &str) -> DomainResult<EmailMessage> {
        Ok(EmailMessage {
            from: self.sender.clone(),
            to: to.to_string(),
            subject: "Charging finished!".to_string(),
            body: format!(
                "Hello,\n\nyour charging session at station {} has finished.\n\n\
                 Best regards,\n[{}]",
                station.name,
                self.signature(station)?
            ),
        })
    }
}

impl StationObserver for UserNotifier {
    fn name(&self) -> &'static str {
        "user_notifier"
    }

    fn on_status_changed(&self, change: &StatusChange) -> DomainResult<()> {
        let Some(email) = change.session_email.as_deref().filter(|e| !e.is_empty()) else {
            return Ok(());
        };

        let message = if change.started_session() {
            self.started(&change.station, email)?
        } else if change.ended_session() {
            self.ended(&change.station, email)?
        } else {
            return Ok(());
        };

        self.sink
            .deliver(NotificationMessage::new(Notification::Email(message)));
        Ok(())
    }
}
