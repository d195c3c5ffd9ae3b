//! Station management

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use super::provider::ProviderService;
use crate::domain::{
    CreateStationDto, DomainError, DomainResult, Station, StationRepository, StationStatus,
};
use crate::notifications::ObserverManager;

pub struct StationService {
    stations: Arc<dyn StationRepository>,
    providers: ProviderService,
    observers: Arc<ObserverManager>,
}

impl StationService {
    pub fn new(
        stations: Arc<dyn StationRepository>,
        providers: ProviderService,
        observers: Arc<ObserverManager>,
    ) -> Self {
        Self {
            stations,
            providers,
            observers,
        }
    }

    /// Store a new station, attach it to its provider (which must exist)
    /// and register the standard observers on it.
    pub fn create(&self, dto: CreateStationDto) -> DomainResult<Station> {
        dto.validate()?;
        if let Some(provider_id) = dto.provider_id {
            self.providers.get(provider_id)?;
        }

        let mut station = Station::from(dto);
        station.id = self.stations.add(station.clone())?;
        if let Some(provider_id) = station.provider_id {
            self.providers.attach_station(provider_id, station.id)?;
        }
        self.observers.register_observers(station.id);

        info!(station_id = station.id, name = %station.name, "Station created");
        Ok(station)
    }

    pub fn get(&self, id: i32) -> DomainResult<Station> {
        self.stations
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Station", "id", id))
    }

    pub fn list(&self) -> DomainResult<Vec<Station>> {
        self.stations.find_all()
    }

    pub fn list_by_provider(&self, provider_id: i32) -> DomainResult<Vec<Station>> {
        self.providers.get(provider_id)?;
        self.stations.find_by_provider(provider_id)
    }

    /// Replace a station's details. A provider change moves the station
    /// between providers; a status change notifies observers.
    pub fn update(&self, station: Station) -> DomainResult<Station> {
        CreateStationDto {
            name: station.name.clone(),
            location: station.location.clone(),
            coordinates: station.coordinates.clone(),
            status: station.status,
            provider_id: station.provider_id,
            connectors: station.connectors,
            max_power_kw: station.max_power_kw,
        }
        .validate()?;

        let current = self.get(station.id)?;
        if current.provider_id != station.provider_id {
            if let Some(next) = station.provider_id {
                self.providers.get(next)?;
            }
            if let Some(previous) = current.provider_id {
                self.providers.detach_station(previous, station.id)?;
            }
            if let Some(next) = station.provider_id {
                self.providers.attach_station(next, station.id)?;
            }
        }

        self.stations.update(station.clone())?;
        self.get(station.id)
    }

    /// Remove a station, detaching it from its provider first.
    pub fn delete(&self, id: i32) -> DomainResult<()> {
        let station = self.get(id)?;
        if let Some(provider_id) = station.provider_id {
            self.providers.detach_station(provider_id, id)?;
        }
        self.stations.delete(id)?;
        self.observers.remove(id);
        info!(station_id = id, "Station deleted");
        Ok(())
    }

    pub fn update_status(&self, id: i32, status: StationStatus) -> DomainResult<Station> {
        if !self.stations.update_status(id, status)? {
            return Err(DomainError::not_found("Station", "id", id));
        }
        self.get(id)
    }
}
