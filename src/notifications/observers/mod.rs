//! The standard station observers

pub mod provider_notifier;
pub mod station_display;
pub mod user_notifier;

pub use provider_notifier::ProviderNotifier;
pub use station_display::{build_board, StationDisplay};
pub use user_notifier::UserNotifier;
