//! Read-only station views over a provider's station list

use std::sync::Arc;

use crate::domain::{
    DomainError, DomainResult, Provider, ProviderRepository, Station, StationRepository,
};

/// Filters apply to a provider's stations in the provider's list order.
#[derive(Clone)]
pub struct StationQueries {
    providers: Arc<dyn ProviderRepository>,
    stations: Arc<dyn StationRepository>,
}

impl StationQueries {
    pub fn new(providers: Arc<dyn ProviderRepository>, stations: Arc<dyn StationRepository>) -> Self {
        Self {
            providers,
            stations,
        }
    }

    pub fn available(&self, provider_id: i32) -> DomainResult<Vec<Station>> {
        self.filtered(provider_id, |s| s.is_available())
    }

    /// Stations rated at `min_kw` or more
    pub fn min_power(&self, provider_id: i32, min_kw: f64) -> DomainResult<Vec<Station>> {
        self.filtered(provider_id, |s| s.max_power_kw >= min_kw)
    }

    /// Stations whose location contains `region`, ignoring case
    pub fn in_region(&self, provider_id: i32, region: &str) -> DomainResult<Vec<Station>> {
        let needle = region.to_lowercase();
        self.filtered(provider_id, |s| s.location.to_lowercase().contains(&needle))
    }

    /// Every provider's stations, sorted by name
    pub fn all_sorted_by_name(&self) -> DomainResult<Vec<Station>> {
        let mut all = Vec::new();
        for provider in self.providers.find_all()? {
            all.extend(self.stations_of(&provider)?);
        }
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    fn filtered<F>(&self, provider_id: i32, keep: F) -> DomainResult<Vec<Station>>
    where
        F: Fn(&Station) -> bool,
    {
        let provider = self
            .providers
            .find_by_id(provider_id)?
            .ok_or_else(|| DomainError::not_found("Provider", "id", provider_id))?;
        Ok(self
            .stations_of(&provider)?
            .into_iter()
            .filter(|s| keep(s))
            .collect())
    }

    fn stations_of(&self, provider: &Provider) -> DomainResult<Vec<Station>> {
        let mut stations = Vec::with_capacity(provider.station_ids().len());
        for id in provider.station_ids() {
            if let Some(station) = self.stations.find_by_id(*id)? {
                stations.push(station);
            }
        }
        Ok(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationStatus;
    use crate::infrastructure::{InMemoryProviderStore, InMemoryStationStore};
    use crate::notifications::NotificationBus;

    fn queries() -> (StationQueries, i32, i32) {
        let providers = Arc::new(InMemoryProviderStore::new());
        let stations = Arc::new(InMemoryStationStore::new(Arc::new(
            NotificationBus::default(),
        )));

        let a = providers.add(Provider::new("ElectroDrive")).unwrap();
        let b = providers.add(Provider::new("GreenCharge")).unwrap();
        let fixtures = [
            (a, "Zeta Mall", "Ljubljana, Center", StationStatus::Occupied, 50.0),
            (a, "Alpha Airport", "Brnik", StationStatus::Available, 150.0),
            (a, "Mid Town", "ljubljana, Šiška", StationStatus::Available, 22.0),
            (b, "Beta Hub", "Maribor", StationStatus::Available, 11.0),
        ];
        for (provider_id, name, location, status, kw) in fixtures {
            let id = stations
                .add(
                    Station::new(name, kw)
                        .with_status(status)
                        .with_location(location, "")
                        .with_provider(provider_id),
                )
                .unwrap();
            providers.link_station(provider_id, id).unwrap();
        }

        (StationQueries::new(providers, stations), a, b)
    }

    fn names(stations: Vec<Station>) -> Vec<String> {
        stations.into_iter().map(|s| s.name).collect()
    }

    #[test]
    fn available_keeps_provider_order() {
        let (q, a, _) = queries();
        assert_eq!(names(q.available(a).unwrap()), vec!["Alpha Airport", "Mid Town"]);
    }

    #[test]
    fn min_power_is_inclusive() {
        let (q, a, _) = queries();
        assert_eq!(names(q.min_power(a, 50.0).unwrap()), vec!["Zeta Mall", "Alpha Airport"]);
        assert!(q.min_power(a, 500.0).unwrap().is_empty());
    }

    #[test]
    fn region_match_ignores_case() {
        let (q, a, _) = queries();
        assert_eq!(
            names(q.in_region(a, "LJUBLJANA").unwrap()),
            vec!["Zeta Mall", "Mid Town"]
        );
    }

    #[test]
    fn all_sorted_by_name_spans_providers() {
        let (q, _, _) = queries();
        assert_eq!(
            names(q.all_sorted_by_name().unwrap()),
            vec!["Alpha Airport", "Beta Hub", "Mid Town", "Zeta Mall"]
        );
    }

    #[test]
    fn unknown_provider_is_not_found() {
        let (q, _, _) = queries();
        assert!(matches!(q.available(99), Err(DomainError::NotFound { .. })));
    }
}
