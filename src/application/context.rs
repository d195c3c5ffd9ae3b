//! Application context
//!
//! Builds the stores, the notification bus, the observers, the admission
//! chain and the services once, and hands out shared references. Nothing
//! in the crate is a global.

use std::sync::Arc;

use super::admission::AdmissionChain;
use super::processor::ChargingRequestProcessor;
use super::services::{ProviderService, StationQueries, StationService, UserService};
use crate::config::AppConfig;
use crate::domain::{CompatibilityPolicy, ProviderRepository, StationRepository, UserRepository};
use crate::infrastructure::{InMemoryProviderStore, InMemoryStationStore, InMemoryUserStore};
use crate::notifications::{
    create_notification_bus, DispatchPolicy, ObserverManager, SharedNotificationBus, SharedSink,
    TracingSink,
};
use crate::shared::errors::ConfigError;

#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    pub dispatch_policy: DispatchPolicy,
    pub compatibility: CompatibilityPolicy,
}

impl ContextOptions {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            dispatch_policy: config.notifications.failure_policy,
            compatibility: config.compatibility_policy()?,
        })
    }
}

pub struct AppContext {
    pub users: Arc<dyn UserRepository>,
    pub providers: Arc<dyn ProviderRepository>,
    pub stations: Arc<dyn StationRepository>,
    pub bus: SharedNotificationBus,
    pub observers: Arc<ObserverManager>,
    pub user_service: UserService,
    pub provider_service: ProviderService,
    pub station_service: StationService,
    pub queries: StationQueries,
    pub processor: ChargingRequestProcessor,
}

pub type SharedContext = Arc<AppContext>;

impl AppContext {
    /// Observer output goes to `sink`.
    pub fn new(options: ContextOptions, sink: SharedSink) -> Self {
        let bus = create_notification_bus(options.dispatch_policy);

        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserStore::new());
        let providers: Arc<dyn ProviderRepository> = Arc::new(InMemoryProviderStore::new());
        let stations: Arc<dyn StationRepository> =
            Arc::new(InMemoryStationStore::new(bus.clone()));

        let observers = Arc::new(ObserverManager::new(
            bus.clone(),
            providers.clone(),
            Arc::downgrade(&stations),
            sink,
        ));

        let provider_service = ProviderService::new(providers.clone(), stations.clone());
        let station_service =
            StationService::new(stations.clone(), provider_service.clone(), observers.clone());
        let chain = AdmissionChain::new(users.clone(), stations.clone(), options.compatibility);

        Self {
            user_service: UserService::new(users.clone()),
            queries: StationQueries::new(providers.clone(), stations.clone()),
            processor: ChargingRequestProcessor::new(users.clone(), stations.clone(), chain),
            provider_service,
            station_service,
            users,
            providers,
            stations,
            bus,
            observers,
        }
    }

    /// Context configured from `config`, logging observer output.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            ContextOptions::from_config(config)?,
            Arc::new(TracingSink),
        ))
    }

    pub fn shared(self) -> SharedContext {
        Arc::new(self)
    }
}
