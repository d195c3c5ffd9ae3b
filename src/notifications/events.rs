//! Notification payloads
//!
//! Everything an observer emits is one of these, wrapped in a
//! [`NotificationMessage`] with an id and timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Notification {
    Email(EmailMessage),
    ProviderAlert(ProviderAlert),
    StationBoard(StationBoard),
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Email(_) => "email",
            Notification::ProviderAlert(_) => "provider_alert",
            Notification::StationBoard(_) => "station_board",
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::Email(e) => write!(f, "{}", e),
            Notification::ProviderAlert(a) => write!(f, "{}", a),
            Notification::StationBoard(b) => write!(f, "{}", b),
        }
    }
}

/// Email sent to the driver of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl std::fmt::Display for EmailMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[EMAIL] From: {}", self.from)?;
        writeln!(f, "To: {}", self.to)?;
        writeln!(f, "Subject: {}", self.subject)?;
        writeln!(f)?;
        write!(f, "{}", self.body)
    }
}

/// Status update addressed to the owning provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAlert {
    pub station_id: i32,
    pub station_name: String,
    pub provider_name: String,
    pub old_status: String,
    pub new_status: String,
    /// Human wording of `new_status`
    pub status_text: String,
}

impl std::fmt::Display for ProviderAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Provider notified: station {} at provider {} is now {}.",
            self.station_name, self.provider_name, self.status_text
        )
    }
}

/// System-wide partition of stations by availability
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StationBoard {
    pub available: Vec<String>,
    pub occupied: Vec<String>,
}

impl StationBoard {
    pub fn available_line(&self) -> String {
        if self.available.is_empty() {
            "no available stations".to_string()
        } else {
            self.available.join(", ")
        }
    }

    pub fn occupied_line(&self) -> String {
        if self.occupied.is_empty() {
            "no occupied stations".to_string()
        } else {
            self.occupied.join(", ")
        }
    }
}

impl std::fmt::Display for StationBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[Station display] Current station status:")?;
        writeln!(f, "Available: {}", self.available_line())?;
        write!(f, "Occupied: {}", self.occupied_line())
    }
}

/// Wrapper for delivered notifications with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub notification: Notification,
}

impl NotificationMessage {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            notification,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_lines_fall_back_when_empty() {
        let board = StationBoard::default();
        assert_eq!(board.available_line(), "no available stations");
        assert_eq!(board.occupied_line(), "no occupied stations");
    }

    #[test]
    fn board_joins_names_with_commas() {
        let board = StationBoard {
            available: vec!["A".into(), "B".into()],
            occupied: vec!["C".into()],
        };
        assert_eq!(board.available_line(), "A, B");
        assert!(board.to_string().ends_with("Occupied: C"));
    }

    #[test]
    fn message_serializes_with_type_tag() {
        let msg = NotificationMessage::new(Notification::StationBoard(StationBoard::default()));
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "StationBoard");
        assert!(json["id"].as_str().is_some_and(|id| !id.is_empty()));
    }
}
