//! Station notifications
//!
//! Status changes on a station are delivered synchronously, in
//! registration order, to that station's observers on the
//! [`NotificationBus`]. Observers render their output as a
//! [`Notification`] and hand it to a [`NotificationSink`].
//!
//! # Usage
//! ```ignore
//! let bus = create_notification_bus(DispatchPolicy::Isolate);
//! let manager = ObserverManager::new(bus.clone(), providers, Arc::downgrade(&stations), sink);
//! manager.register_observers(station_id);
//! ```

pub mod bus;
pub mod events;
pub mod manager;
pub mod observer;
pub mod observers;
pub mod sink;

pub use bus::{create_notification_bus, DispatchPolicy, NotificationBus, SharedNotificationBus};
pub use events::*;
pub use manager::ObserverManager;
pub use observer::{SharedObserver, StationObserver};
pub use observers::{build_board, ProviderNotifier, StationDisplay, UserNotifier};
pub use sink::{MemorySink, NotificationSink, SharedSink, TracingSink};
