//! Station notification bus
//!
//! Keeps an ordered observer list per station and fans status changes out
//! to it synchronously.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::observer::{same_observer, SharedObserver};
use crate::domain::{DomainError, DomainResult, StatusChange};

/// What happens when an observer returns an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Log the failure and keep notifying the remaining observers
    #[default]
    Isolate,
    /// Stop at the first failure and surface it to the caller
    FailFast,
}

pub struct NotificationBus {
    observers: DashMap<i32, Vec<SharedObserver>>,
    policy: DispatchPolicy,
}

impl NotificationBus {
    pub fn new(policy: DispatchPolicy) -> Self {
        Self {
            observers: DashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Register an observer for a station. Returns false if that exact
    /// observer is already registered there.
    pub fn add_observer(&self, station_id: i32, observer: SharedObserver) -> bool {
        let mut list = self.observers.entry(station_id).or_default();
        if list.iter().any(|existing| same_observer(existing, &observer)) {
            return false;
        }
        debug!(station_id, observer = observer.name(), "Observer registered");
        list.push(observer);
        true
    }

    pub fn remove_observer(&self, station_id: i32, observer: &SharedObserver) -> bool {
        match self.observers.get_mut(&station_id) {
            Some(mut list) => {
                let len_before = list.len();
                list.retain(|existing| !same_observer(existing, observer));
                list.len() < len_before
            }
            None => false,
        }
    }

    /// Drop every observer of a deleted station
    pub fn forget(&self, station_id: i32) {
        self.observers.remove(&station_id);
    }

    pub fn observer_count(&self, station_id: i32) -> usize {
        self.observers
            .get(&station_id)
            .map(|list| list.len())
            .unwrap_or(0)
    }

    /// Notify the station's observers in registration order.
    pub fn notify(&self, change: &StatusChange) -> DomainResult<()> {
        // Iterate over a copy so observers may (un)register without deadlocking
        let observers: Vec<SharedObserver> = self
            .observers
            .get(&change.station.id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();

        debug!(
            station_id = change.station.id,
            from = %change.previous,
            to = %change.current(),
            observers = observers.len(),
            "Dispatching status change"
        );

        for observer in &observers {
            if let Err(e) = observer.on_status_changed(change) {
                match self.policy {
                    DispatchPolicy::Isolate => {
                        warn!(
                            station_id = change.station.id,
                            observer = observer.name(),
                            error = %e,
                            "Observer failed, continuing"
                        );
                    }
                    DispatchPolicy::FailFast => {
                        return Err(match e {
                            DomainError::Observer { .. } => e,
                            other => DomainError::Observer {
                                observer: observer.name(),
                                message: other.to_string(),
                            },
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(DispatchPolicy::default())
    }
}

pub type SharedNotificationBus = Arc<NotificationBus>;

pub fn create_notification_bus(policy: DispatchPolicy) -> SharedNotificationBus {
    Arc::new(NotificationBus::new(policy))
}
