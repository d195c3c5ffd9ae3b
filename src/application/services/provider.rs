//! Provider management and the provider/station relationship

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::domain::{
    CreateProviderDto, DomainError, DomainResult, Provider, ProviderRepository, StationRepository,
};

/// Keeps both sides of the provider/station link consistent: the
/// provider's station list and the station's provider id.
#[derive(Clone)]
pub struct ProviderService {
    providers: Arc<dyn ProviderRepository>,
    stations: Arc<dyn StationRepository>,
}

impl ProviderService {
    pub fn new(providers: Arc<dyn ProviderRepository>, stations: Arc<dyn StationRepository>) -> Self {
        Self {
            providers,
            stations,
        }
    }

    pub fn create(&self, dto: CreateProviderDto) -> DomainResult<Provider> {
        dto.validate()?;
        let mut provider = Provider::from(dto);
        provider.id = self.providers.add(provider.clone())?;
        info!(provider_id = provider.id, name = %provider.name, "Provider created");
        Ok(provider)
    }

    pub fn get(&self, id: i32) -> DomainResult<Provider> {
        self.providers
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Provider", "id", id))
    }

    pub fn list(&self) -> DomainResult<Vec<Provider>> {
        self.providers.find_all()
    }

    /// Update contact details. The station list is not touched.
    pub fn update(&self, provider: Provider) -> DomainResult<Provider> {
        CreateProviderDto {
            name: provider.name.clone(),
            contact_person: provider.contact_person.clone(),
            email: provider.email.clone(),
            phone: provider.phone.clone(),
            address: provider.address.clone(),
        }
        .validate()?;

        if !self.providers.update(provider.clone())? {
            return Err(DomainError::not_found("Provider", "id", provider.id));
        }
        self.get(provider.id)
    }

    /// Refused while stations are still attached.
    pub fn delete(&self, id: i32) -> DomainResult<()> {
        let provider = self.get(id)?;
        if !provider.station_ids().is_empty() {
            return Err(DomainError::InUse(format!(
                "provider {} still owns {} station(s)",
                id,
                provider.station_ids().len()
            )));
        }
        self.providers.delete(id)?;
        info!(provider_id = id, "Provider deleted");
        Ok(())
    }

    /// Make `provider_id` the owner of `station_id`, moving it away from
    /// any previous owner.
    pub fn attach_station(&self, provider_id: i32, station_id: i32) -> DomainResult<()> {
        self.get(provider_id)?;
        let station = self
            .stations
            .find_by_id(station_id)?
            .ok_or_else(|| DomainError::not_found("Station", "id", station_id))?;

        if let Some(previous) = station.provider_id.filter(|p| *p != provider_id) {
            // The previous owner may already be gone
            if self.providers.find_by_id(previous)?.is_some() {
                self.providers.unlink_station(previous, station_id)?;
            }
        }

        self.providers.link_station(provider_id, station_id)?;
        if station.provider_id != Some(provider_id) {
            self.stations.set_provider(station_id, Some(provider_id))?;
        }
        info!(provider_id, station_id, "Station attached to provider");
        Ok(())
    }

    pub fn detach_station(&self, provider_id: i32, station_id: i32) -> DomainResult<()> {
        if !self.providers.unlink_station(provider_id, station_id)? {
            return Err(DomainError::not_found("Station", "id", station_id));
        }

        if let Some(station) = self.stations.find_by_id(station_id)? {
            if station.provider_id == Some(provider_id) {
                self.stations.set_provider(station_id, None)?;
            }
        }
        info!(provider_id, station_id, "Station detached from provider");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::{Station, StatusChange};
    use crate::infrastructure::{InMemoryProviderStore, InMemoryStationStore};
    use crate::notifications::{NotificationBus, StationObserver};

    #[derive(Default)]
    struct Counter(AtomicUsize);

    impl StationObserver for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }

        fn on_status_changed(&self, _change: &StatusChange) -> DomainResult<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn service() -> (ProviderService, Arc<InMemoryStationStore>) {
        let stations = Arc::new(InMemoryStationStore::new(Arc::new(
            NotificationBus::default(),
        )));
        let service = ProviderService::new(Arc::new(InMemoryProviderStore::new()), stations.clone());
        (service, stations)
    }

    fn dto(name: &str) -> CreateProviderDto {
        CreateProviderDto {
            name: name.into(),
            email: format!("info@{}.si", name.to_lowercase()),
            ..CreateProviderDto::default()
        }
    }

    #[test]
    fn create_starts_with_no_stations() {
        let (providers, _) = service();
        let provider = providers.create(dto("ElectroDrive")).unwrap();
        assert_eq!(provider.id, 1);
        assert!(provider.station_ids().is_empty());
    }

    #[test]
    fn create_rejects_bad_input() {
        let (providers, _) = service();
        assert!(providers.create(dto("  ")).is_err());
        let bad_email = CreateProviderDto {
            email: "nope".into(),
            ..dto("GreenCharge")
        };
        assert!(matches!(
            providers.create(bad_email),
            Err(DomainError::Validation(_))
        ));
        // Empty email is allowed
        let no_email = CreateProviderDto {
            email: String::new(),
            ..dto("GreenCharge")
        };
        assert!(providers.create(no_email).is_ok());
    }

    #[test]
    fn attach_then_detach_restores_both_sides() {
        let (providers, stations) = service();
        let provider = providers.create(dto("EcoVolt")).unwrap();
        let station_id = stations.add(Station::new("EcoVolt Mall", 50.0)).unwrap();
        let before = providers.get(provider.id).unwrap().station_ids().to_vec();

        providers.attach_station(provider.id, station_id).unwrap();
        assert!(providers.get(provider.id).unwrap().owns_station(station_id));
        assert_eq!(
            stations.find_by_id(station_id).unwrap().unwrap().provider_id,
            Some(provider.id)
        );

        providers.detach_station(provider.id, station_id).unwrap();
        assert_eq!(providers.get(provider.id).unwrap().station_ids(), before.as_slice());
        assert_eq!(stations.find_by_id(station_id).unwrap().unwrap().provider_id, None);
    }

    #[test]
    fn attach_moves_station_between_providers() {
        let (providers, stations) = service();
        let a = providers.create(dto("PowerPlugs")).unwrap();
        let b = providers.create(dto("VoltVenture")).unwrap();
        let station_id = stations.add(Station::new("Shared", 22.0)).unwrap();

        providers.attach_station(a.id, station_id).unwrap();
        providers.attach_station(b.id, station_id).unwrap();

        assert!(!providers.get(a.id).unwrap().owns_station(station_id));
        assert!(providers.get(b.id).unwrap().owns_station(station_id));
    }

    #[test]
    fn delete_is_refused_while_stations_attached() {
        let (providers, stations) = service();
        let provider = providers.create(dto("ElectroDrive")).unwrap();
        let station_id = stations.add(Station::new("Airport", 150.0)).unwrap();
        providers.attach_station(provider.id, station_id).unwrap();

        assert!(matches!(
            providers.delete(provider.id),
            Err(DomainError::InUse(_))
        ));

        providers.detach_station(provider.id, station_id).unwrap();
        providers.delete(provider.id).unwrap();
        assert!(matches!(
            providers.get(provider.id),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn detach_of_unlisted_station_is_not_found() {
        let (providers, _) = service();
        let provider = providers.create(dto("EcoVolt")).unwrap();
        assert!(providers.detach_station(provider.id, 3).is_err());
    }

    #[test]
    fn ownership_changes_leave_a_running_session_alone() {
        let (providers, stations) = service();
        let a = providers.create(dto("PowerPlugs")).unwrap();
        let b = providers.create(dto("VoltVenture")).unwrap();
        let station_id = stations.add(Station::new("Garage", 22.0)).unwrap();
        stations.claim(station_id, "emma@example.com").unwrap();
        let counter = Arc::new(Counter::default());
        stations.bus().add_observer(station_id, counter.clone());

        providers.attach_station(a.id, station_id).unwrap();
        providers.attach_station(b.id, station_id).unwrap();
        providers.detach_station(b.id, station_id).unwrap();

        let stored = stations.find_by_id(station_id).unwrap().unwrap();
        assert!(stored.is_occupied());
        assert_eq!(stored.session_email.as_deref(), Some("emma@example.com"));
        assert_eq!(stored.provider_id, None);
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn attach_racing_a_claim_keeps_the_session() {
        let (providers, stations) = service();
        let provider = providers.create(dto("EcoVolt")).unwrap();

        for _ in 0..200 {
            let station_id = stations.add(Station::new("Race", 22.0)).unwrap();
            std::thread::scope(|scope| {
                let providers = &providers;
                let stations = &stations;
                scope.spawn(move || providers.attach_station(provider.id, station_id).unwrap());
                scope.spawn(move || stations.claim(station_id, "emma@example.com").unwrap());
            });

            let stored = stations.find_by_id(station_id).unwrap().unwrap();
            assert_eq!(stored.provider_id, Some(provider.id));
            assert!(stored.is_occupied());
            assert_eq!(stored.session_email.as_deref(), Some("emma@example.com"));
        }
    }
}
